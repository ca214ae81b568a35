//! Pointer-driven editing on top of [`Graph`].
//!
//! Primary click: on empty canvas places a node, on a node feeds the two-click
//! connect protocol and selects the node. Secondary click: on a node starts a
//! drag, elsewhere selects the closest edge and asks the shell to edit it.
//! Everything is synchronous; modal collaborators are plain trait calls.

use crate::algorithms::picking::Pick;
use crate::config::EditorConfig;
use crate::error::{ConfigError, DocumentError, EditError, GraphError, ValidationError};
use crate::geometry::curve::{edge_curve, EdgeCurve};
use crate::model::{ConnectOutcome, EdgeKey, EdgeValue, NodeId};
use crate::session::{propose_edge_value, EdgeEditSession};
use crate::shell::{ConfirmPrompt, EdgeValueDialog, FileChooser, Notifier};
use crate::{in_bounds, storage, Graph};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// Maps DOM `MouseEvent.button` codes (0 left, 2 right).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Primary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    Edge(EdgeKey),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerOutcome {
    NodeAdded { node: NodeId },
    Connect { node: NodeId, result: ConnectOutcome },
    /// The shell should open the edge-value dialog for `edge`.
    EditEdge { edge: EdgeKey, current: EdgeValue },
    DragStarted { node: NodeId },
    Missed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Cancelled,
    Updated(EdgeValue),
    Rejected(ValidationError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeleteOutcome {
    NothingSelected,
    Cancelled,
    NodeRemoved { node: NodeId, edges: usize },
    EdgeRemoved { edge: EdgeKey, value: EdgeValue },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Cancelled,
    Loaded { nodes: usize, edges: usize },
    Failed { message: String },
}

#[derive(Clone, Debug, Default)]
pub struct Editor {
    graph: Graph,
    config: EditorConfig,
    selection: Selection,
    drag: DragState,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Editor { config, ..Self::default() })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the config; an invalid one leaves the current config in place.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    // Pointer events

    /// Clicks outside the canvas bounds (or non-finite) are `Missed` and
    /// change nothing.
    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) -> Result<PointerOutcome, GraphError> {
        if !in_bounds(x, y) {
            debug!(x, y, "click outside canvas bounds");
            return Ok(PointerOutcome::Missed);
        }
        match button {
            PointerButton::Primary => self.primary_down(x, y),
            PointerButton::Secondary => Ok(self.secondary_down(x, y)),
        }
    }

    fn primary_down(&mut self, x: f64, y: f64) -> Result<PointerOutcome, GraphError> {
        let catch_sq = self.config.placement_catch_sq();
        let Some(node) = crate::algorithms::picking::closest_node_impl(&self.graph, x, y, catch_sq) else {
            return Ok(match self.graph.add_node_with_catch(x, y, catch_sq) {
                Some(node) => {
                    debug!(node = %node, x, y, "node placed");
                    PointerOutcome::NodeAdded { node }
                }
                None => PointerOutcome::Missed,
            });
        };
        let result = self.graph.begin_or_complete_edge(node)?;
        self.selection = Selection::Node(node);
        Ok(PointerOutcome::Connect { node, result })
    }

    fn secondary_down(&mut self, x: f64, y: f64) -> PointerOutcome {
        match self.graph.pick(x, y, &self.config) {
            Some(Pick::Node { id, .. }) => {
                self.drag = DragState::Dragging(id);
                PointerOutcome::DragStarted { node: id }
            }
            Some(Pick::Edge { key, .. }) => {
                self.selection = Selection::Edge(key);
                let current = self.graph.get_edge(key).unwrap_or_default();
                PointerOutcome::EditEdge { edge: key, current }
            }
            None => {
                self.selection = Selection::None;
                PointerOutcome::Missed
            }
        }
    }

    /// Moves the dragged node, if any. Returns whether a node moved.
    /// Out-of-bounds positions are ignored and the drag continues.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let DragState::Dragging(id) = self.drag else { return false };
        match self.graph.move_node(id, x, y) {
            Ok(()) => true,
            Err(GraphError::OutOfBounds { .. }) => false,
            Err(_) => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// Ends any drag; returns the node that was being dragged.
    pub fn pointer_up(&mut self) -> Option<NodeId> {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging(id) => {
                debug!(node = %id, "drag finished");
                Some(id)
            }
            DragState::Idle => None,
        }
    }

    // Edge values

    /// Commits dialog text for `edge`; nothing is written on error.
    pub fn apply_edge_edit(&mut self, edge: EdgeKey, flow_text: &str, capacity_text: &str) -> Result<EdgeValue, EditError> {
        propose_edge_value(&mut self.graph, edge, flow_text, capacity_text)
    }

    /// Runs the dialog for `edge` and reports validation failures through
    /// `notifier`.
    pub fn edit_edge(
        &mut self,
        edge: EdgeKey,
        dialog: &mut impl EdgeValueDialog,
        notifier: &mut impl Notifier,
    ) -> Result<EditOutcome, GraphError> {
        let session = EdgeEditSession::open(&self.graph, edge)?;
        let (flow, capacity) = session.prefill();
        let Some((flow_text, capacity_text)) = dialog.request(&flow, &capacity) else {
            return Ok(EditOutcome::Cancelled);
        };
        match session.commit(&mut self.graph, &flow_text, &capacity_text) {
            Ok(v) => Ok(EditOutcome::Updated(v)),
            Err(EditError::Validation(e)) => {
                notifier.warn("Error", &e.user_message());
                Ok(EditOutcome::Rejected(e))
            }
            Err(EditError::Graph(e)) => Err(e),
        }
    }

    // Deletion

    /// Confirmation text for deleting the current selection.
    pub fn describe_selection(&self) -> Option<String> {
        let label = |id: NodeId| self.graph.ordinal_of(id).map_or_else(|| id.to_string(), |o| (o + 1).to_string());
        match self.selection {
            Selection::None => None,
            Selection::Node(id) => {
                let edges = self.graph.edges().filter(|(k, _)| k.touches(id)).count();
                Some(format!("Delete node {} and its {} edge(s)?", label(id), edges))
            }
            Selection::Edge(k) => Some(format!("Delete edge {} -> {}?", label(k.source), label(k.target))),
        }
    }

    pub fn delete_selected(
        &mut self,
        confirm: &mut impl ConfirmPrompt,
        notifier: &mut impl Notifier,
    ) -> Result<DeleteOutcome, GraphError> {
        let Some(description) = self.describe_selection() else {
            notifier.warn("Error", "Select a node or an edge to delete");
            return Ok(DeleteOutcome::NothingSelected);
        };
        if !confirm.confirm(&description) {
            debug!("delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        self.delete_selected_confirmed()
    }

    /// Deletes the selection without asking; the caller has already confirmed.
    pub fn delete_selected_confirmed(&mut self) -> Result<DeleteOutcome, GraphError> {
        let outcome = match self.selection {
            Selection::None => return Ok(DeleteOutcome::NothingSelected),
            Selection::Node(node) => {
                let edges = self.graph.remove_node(node)?;
                if self.drag == DragState::Dragging(node) {
                    self.drag = DragState::Idle;
                }
                DeleteOutcome::NodeRemoved { node, edges }
            }
            Selection::Edge(edge) => {
                let value = self.graph.remove_edge(edge)?;
                DeleteOutcome::EdgeRemoved { edge, value }
            }
        };
        self.selection = Selection::None;
        Ok(outcome)
    }

    pub fn cancel_connect(&mut self) {
        self.graph.cancel_connect();
    }

    /// Empties the canvas; the geometry version keeps increasing.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.selection = Selection::None;
        self.drag = DragState::Idle;
    }

    // Persistence

    /// Swaps in `graph` and resets all transient interaction state.
    pub fn replace_graph(&mut self, mut graph: Graph) {
        graph.geom_ver = graph.geom_ver.max(self.graph.geom_ver.wrapping_add(1));
        self.graph = graph;
        self.selection = Selection::None;
        self.drag = DragState::Idle;
    }

    /// Parses a document; the current graph is kept when parsing fails.
    pub fn load_str(&mut self, text: &str) -> Result<(), DocumentError> {
        let g = Graph::from_json_str(text)?;
        self.replace_graph(g);
        Ok(())
    }

    pub fn load_path(&mut self, path: &Path) -> Result<(), DocumentError> {
        let g = storage::load_from_path(path)?;
        self.replace_graph(g);
        Ok(())
    }

    pub fn load_from(&mut self, chooser: &mut impl FileChooser, notifier: &mut impl Notifier) -> LoadOutcome {
        let Some(path) = chooser.choose_open() else { return LoadOutcome::Cancelled };
        match self.load_path(&path) {
            Ok(()) => LoadOutcome::Loaded { nodes: self.graph.node_count(), edges: self.graph.edge_count() },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed");
                let message = e.to_string();
                notifier.warn("Error", &message);
                LoadOutcome::Failed { message }
            }
        }
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, DocumentError> {
        storage::save_to_dir(&self.graph, dir)
    }

    // Rendering

    /// Curve placement for every edge with distinct endpoints, in key order.
    pub fn edge_curves(&self) -> Vec<(EdgeKey, EdgeCurve)> {
        self.graph
            .edges()
            .filter_map(|(k, _)| {
                let a = self.graph.get_node(k.source)?;
                let b = self.graph.get_node(k.target)?;
                edge_curve(a.into(), b.into(), &self.config).map(|c| (k, c))
            })
            .collect()
    }
}
