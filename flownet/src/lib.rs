//! Interaction engine for a directed flow-network editor.
//!
//! [`Graph`] owns nodes and capacity-labeled edges, [`algorithms::picking`]
//! resolves pointer positions to nodes and edges, [`session`] validates edge
//! value edits, and the JSON document format lives behind
//! [`Graph::to_json_value`] / [`Graph::from_json_value`]. [`editor::Editor`]
//! wires these to pointer events and the shell collaborators of [`shell`].

pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod session;
pub mod shell;
pub mod storage;
pub mod geometry {
    pub mod curve;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod picking;
}
mod json;

pub use config::EditorConfig;
pub use editor::{DeleteOutcome, DragState, EditOutcome, Editor, LoadOutcome, PointerButton, PointerOutcome, Selection};
pub use error::{ConfigError, DocumentError, EditError, Field, GraphError, ValidationError};
pub use json::parse_edge_key;
pub use model::{ConnectOutcome, ConnectState, EdgeArrays, EdgeKey, EdgeValue, Node, NodeArrays, NodeId, Vec2};

use algorithms::picking::Pick;
use geometry::limits::in_coord_bounds;
use geometry::tolerance::{dist_sq, PLACEMENT_CATCH_SQ};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) nodes: Vec<Option<Node>>, // id is slot, never reused
    pub(crate) edges: BTreeMap<EdgeKey, EdgeValue>,
    pub(crate) connect: ConnectState,
    pub(crate) geom_ver: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: BTreeMap::new(),
            connect: ConnectState::Idle,
            geom_ver: 1,
        }
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    fn require_node(&self, id: NodeId) -> Result<Node, GraphError> {
        self.get_node(id).ok_or(GraphError::NodeNotFound(id))
    }

    // Nodes

    /// Places a node unless `(x, y)` is within the default placement radius
    /// of an existing node or outside the coordinate bounds.
    pub fn add_node(&mut self, x: f64, y: f64) -> Option<NodeId> {
        self.add_node_with_catch(x, y, PLACEMENT_CATCH_SQ)
    }

    pub fn add_node_with_catch(&mut self, x: f64, y: f64, catch_sq: f64) -> Option<NodeId> {
        if !in_bounds(x, y) {
            return None;
        }
        if self.nodes().any(|(_, n)| dist_sq(n.x, n.y, x, y) < catch_sq) {
            return None;
        }
        Some(self.push_node(x, y))
    }

    pub(crate) fn push_node(&mut self, x: f64, y: f64) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Node { x, y }));
        self.bump();
        id
    }

    /// Overwrites the position; overlap with other nodes is allowed, leaving
    /// the coordinate bounds is not.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), GraphError> {
        if !in_bounds(x, y) {
            return Err(GraphError::OutOfBounds { x, y });
        }
        match self.nodes.get_mut(id.slot()) {
            Some(Some(n)) => {
                n.x = x;
                n.y = y;
            }
            _ => return Err(GraphError::NodeNotFound(id)),
        }
        self.bump();
        Ok(())
    }

    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(id.slot()).and_then(|n| *n)
    }

    /// Removes the node and every incident edge; returns how many edges went
    /// with it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<usize, GraphError> {
        self.require_node(id)?;
        self.nodes[id.slot()] = None;
        let before = self.edges.len();
        self.edges.retain(|k, _| !k.touches(id));
        let dropped = before - self.edges.len();
        if self.connect == ConnectState::Armed(id) {
            self.connect = ConnectState::Idle;
        }
        self.bump();
        debug!(node = %id, edges = dropped, "node removed");
        Ok(dropped)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Live nodes in ordinal (creation) order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.map(|n| (NodeId(i as u32), n)))
    }

    /// Rank of the node among live nodes; this is the index the persisted
    /// document uses.
    pub fn ordinal_of(&self, id: NodeId) -> Option<usize> {
        self.get_node(id)?;
        Some(self.nodes[..id.slot()].iter().filter(|n| n.is_some()).count())
    }

    pub fn node_at_ordinal(&self, ordinal: usize) -> Option<NodeId> {
        self.nodes().nth(ordinal).map(|(id, _)| id)
    }

    /// Slot-indexed ordinals, `None` for removed slots.
    pub(crate) fn ordinals(&self) -> Vec<Option<usize>> {
        let mut next = 0;
        self.nodes
            .iter()
            .map(|n| {
                n.map(|_| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }

    // Edges

    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeKey, GraphError> {
        self.require_node(source)?;
        self.require_node(target)?;
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        let key = EdgeKey::new(source, target);
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }
        self.edges.insert(key, EdgeValue::default());
        self.bump();
        debug!(edge = %key, "edge created");
        Ok(key)
    }

    pub fn remove_edge(&mut self, key: EdgeKey) -> Result<EdgeValue, GraphError> {
        let v = self.edges.remove(&key).ok_or(GraphError::EdgeNotFound(key))?;
        self.bump();
        Ok(v)
    }

    /// Raw write; validation belongs to [`session`].
    pub fn set_edge_value(&mut self, key: EdgeKey, value: EdgeValue) -> Result<(), GraphError> {
        let slot = self.edges.get_mut(&key).ok_or(GraphError::EdgeNotFound(key))?;
        *slot = value;
        self.bump();
        Ok(())
    }

    pub fn get_edge(&self, key: EdgeKey) -> Option<EdgeValue> {
        self.edges.get(&key).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, EdgeValue)> + '_ {
        self.edges.iter().map(|(k, v)| (*k, *v))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // Two-click connect

    pub fn connect_state(&self) -> ConnectState {
        self.connect
    }

    pub fn cancel_connect(&mut self) {
        self.connect = ConnectState::Idle;
    }

    pub fn begin_or_complete_edge(&mut self, id: NodeId) -> Result<ConnectOutcome, GraphError> {
        self.require_node(id)?;
        let outcome = match self.connect {
            ConnectState::Idle => {
                self.connect = ConnectState::Armed(id);
                return Ok(ConnectOutcome::Armed { node: id });
            }
            ConnectState::Armed(first) if first == id => ConnectOutcome::Cancelled { node: id },
            ConnectState::Armed(first) => match self.add_edge(first, id) {
                Ok(edge) => ConnectOutcome::Created { edge },
                Err(GraphError::DuplicateEdge(edge)) => ConnectOutcome::AlreadyExists { edge },
                Err(e) => {
                    self.connect = ConnectState::Idle;
                    return Err(e);
                }
            },
        };
        self.connect = ConnectState::Idle;
        Ok(outcome)
    }

    // Renderer views

    pub fn get_node_arrays(&self) -> NodeArrays {
        let mut out = NodeArrays::default();
        for (id, n) in self.nodes() {
            out.ids.push(id.0);
            out.positions.push(n.x);
            out.positions.push(n.y);
        }
        out
    }

    pub fn get_edge_arrays(&self) -> EdgeArrays {
        let mut out = EdgeArrays::default();
        for (k, v) in self.edges() {
            out.endpoints.push(k.source.0);
            out.endpoints.push(k.target.0);
            out.flows.push(v.flow);
            out.capacities.push(v.capacity);
        }
        out
    }

    // Picking

    /// Nearest node inside the placement radius.
    pub fn closest_node(&self, x: f64, y: f64) -> Option<NodeId> {
        algorithms::picking::closest_node_impl(self, x, y, PLACEMENT_CATCH_SQ)
    }

    pub fn closest_edge(&self, x: f64, y: f64) -> Option<EdgeKey> {
        algorithms::picking::closest_edge_impl(self, x, y)
    }

    pub fn pick(&self, x: f64, y: f64, cfg: &EditorConfig) -> Option<Pick> {
        algorithms::picking::pick_impl(self, x, y, cfg)
    }

    // JSON

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Graph, DocumentError> {
        json::from_json_impl(v)
    }

    pub fn from_json_str(s: &str) -> Result<Graph, DocumentError> {
        let v: serde_json::Value = serde_json::from_str(s)?;
        json::from_json_impl(v)
    }

    // Clear
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.connect = ConnectState::Idle;
        self.bump();
    }

    fn ordinal_edges(&self) -> Vec<((usize, usize), EdgeValue)> {
        let ord = self.ordinals();
        let mut out: Vec<_> = self
            .edges()
            .filter_map(|(k, v)| {
                let s = ord.get(k.source.slot()).copied().flatten()?;
                let t = ord.get(k.target.slot()).copied().flatten()?;
                Some(((s, t), v))
            })
            .collect();
        out.sort_by_key(|&(st, _)| st);
        out
    }
}

/// Positions the document format can hold: finite and inside
/// `limits::COORD_MIN..=COORD_MAX` on both axes.
pub fn in_bounds(x: f64, y: f64) -> bool {
    in_coord_bounds(x) && in_coord_bounds(y)
}

/// Structural equality: same node positions in ordinal order and the same
/// edges expressed over ordinals. Slot ids and the connect state are ignored.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes().map(|(_, n)| n).eq(other.nodes().map(|(_, n)| n))
            && self.ordinal_edges() == other.ordinal_edges()
    }
}
