use crate::error::{envelope, Failure, JsResult};
use crate::interop::{counts, f64s, object, to_js, u32s};
use crate::Canvas;
use flownet::shell::CollectingNotifier;
use flownet::{DeleteOutcome, EdgeKey, EditorConfig, GraphError, NodeId, PointerButton};
use wasm_bindgen::prelude::*;
use web_sys::console;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// `graph_YYYY_MM_DD-<AM|PM>hh_mm.json` for the current local time.
#[wasm_bindgen]
pub fn save_file_name() -> String {
    flownet::storage::current_save_name()
}

fn edge_key(source: u32, target: u32) -> EdgeKey {
    EdgeKey::new(NodeId(source), NodeId(target))
}

fn finite(param: &'static str, v: f64) -> Result<f64, Failure> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Failure::non_finite(param))
    }
}

fn warn_load_failure(e: &flownet::DocumentError) {
    console::warn_1(&JsValue::from_str(&format!("load failed: {}", e)));
}

#[wasm_bindgen]
impl Canvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Canvas {
        crate::Canvas::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }
    pub fn node_count(&self) -> u32 {
        self.inner.graph().node_count() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.graph().edge_count() as u32
    }

    /// Replaces the tunables from a JSON object; missing fields keep defaults.
    pub fn set_config_res(&mut self, json: &str) -> JsValue {
        envelope(self.rs_set_config(json))
    }

    // Pointer events

    /// Far-off clicks come back as `missed`; non-finite ones are errors.
    pub fn pointer_down_res(&mut self, button: u8, x: f64, y: f64) -> JsValue {
        envelope(self.rs_pointer_down(button, x, y))
    }
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        x.is_finite() && y.is_finite() && self.inner.pointer_move(x, y)
    }
    pub fn pointer_up(&mut self) -> Option<u32> {
        self.inner.pointer_up().map(|id| id.0)
    }
    pub fn cancel_connect(&mut self) {
        self.inner.cancel_connect();
    }
    pub fn connect_state(&self) -> JsValue {
        to_js(&self.inner.graph().connect_state()).unwrap_or(JsValue::NULL)
    }
    pub fn selection(&self) -> JsValue {
        to_js(&self.inner.selection()).unwrap_or(JsValue::NULL)
    }

    // Render data

    pub fn get_node_data(&self) -> JsValue {
        let na = self.inner.graph().get_node_arrays();
        object(&[("ids", u32s(&na.ids)), ("positions", f64s(&na.positions))])
    }
    pub fn get_edge_data(&self) -> JsValue {
        let ea = self.inner.graph().get_edge_arrays();
        object(&[
            ("endpoints", u32s(&ea.endpoints)),
            ("flows", counts(&ea.flows)),
            ("capacities", counts(&ea.capacities)),
        ])
    }
    /// `endpoints` pairs plus 12 floats per edge: start, control, end,
    /// arrow_left, arrow_right, label.
    pub fn get_edge_geometry(&self) -> JsValue {
        let curves = self.inner.edge_curves();
        let endpoints: Vec<u32> = curves.iter().flat_map(|(k, _)| [k.source.0, k.target.0]).collect();
        let geometry: Vec<f64> = curves.iter().flat_map(|(_, c)| c.to_array()).collect();
        object(&[("endpoints", u32s(&endpoints)), ("geometry", f64s(&geometry))])
    }

    // Edge values

    pub fn get_edge_res(&self, source: u32, target: u32) -> JsValue {
        let key = edge_key(source, target);
        envelope(match self.inner.graph().get_edge(key) {
            Some(v) => to_js(&v).map_err(Failure::from),
            None => Err(GraphError::EdgeNotFound(key).into()),
        })
    }
    pub fn apply_edge_edit_res(&mut self, source: u32, target: u32, flow: &str, capacity: &str) -> JsValue {
        envelope(
            self.inner
                .apply_edge_edit(edge_key(source, target), flow, capacity)
                .map_err(Failure::from)
                .and_then(|v| Ok(to_js(&v)?)),
        )
    }

    // Deletion

    pub fn describe_selection(&self) -> Option<String> {
        self.inner.describe_selection()
    }
    /// `confirm` is called with the description and must return a truthy value
    /// to proceed.
    pub fn delete_selected_res(&mut self, confirm: &js_sys::Function) -> JsValue {
        envelope(self.rs_delete_selected(confirm))
    }
    pub fn delete_selected_confirmed_res(&mut self) -> JsValue {
        envelope(
            self.inner
                .delete_selected_confirmed()
                .map_err(Failure::from)
                .and_then(|outcome| Ok(to_js(&outcome)?)),
        )
    }

    // JSON

    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.graph().to_json_value()).unwrap_or(JsValue::NULL)
    }
    pub fn to_json_string(&self) -> String {
        self.inner.graph().to_json_string()
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        envelope(self.rs_from_json(v))
    }
    pub fn load_str_res(&mut self, text: &str) -> JsValue {
        envelope(self.inner.load_str(text).map(|()| JsValue::TRUE).map_err(|e| {
            warn_load_failure(&e);
            Failure::from(e)
        }))
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Canvas {
    fn rs_set_config(&mut self, json: &str) -> JsResult {
        let cfg = EditorConfig::from_json_str(json)?;
        self.inner.set_config(cfg)?;
        Ok(JsValue::TRUE)
    }

    fn rs_pointer_down(&mut self, button: u8, x: f64, y: f64) -> JsResult {
        let (x, y) = (finite("x", x)?, finite("y", y)?);
        let button = PointerButton::from_code(button).ok_or_else(|| Failure::invalid_button(button))?;
        let outcome = self.inner.pointer_down(button, x, y)?;
        Ok(to_js(&outcome)?)
    }

    fn rs_delete_selected(&mut self, confirm: &js_sys::Function) -> JsResult {
        let mut notifier = CollectingNotifier::default();
        let mut ask = |description: &str| -> bool {
            confirm
                .call1(&JsValue::NULL, &JsValue::from_str(description))
                .map(|v| v.is_truthy())
                .unwrap_or(false)
        };
        match self.inner.delete_selected(&mut ask, &mut notifier)? {
            DeleteOutcome::NothingSelected => {
                let message = notifier.messages.pop().map(|(_, m)| m).unwrap_or_default();
                Err(Failure::new("nothing_selected", message))
            }
            outcome => Ok(to_js(&outcome)?),
        }
    }

    fn rs_from_json(&mut self, v: JsValue) -> JsResult {
        let value: serde_json::Value =
            serde_wasm_bindgen::from_value(v).map_err(|e| Failure::new("json_parse", e.to_string()))?;
        let graph = flownet::Graph::from_json_value(value).map_err(|e| {
            warn_load_failure(&e);
            Failure::from(e)
        })?;
        self.inner.replace_graph(graph);
        Ok(JsValue::TRUE)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
