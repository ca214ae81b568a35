#![cfg(target_arch = "wasm32")]

use flownet_wasm::Canvas;
use js_sys::{Float64Array, Function, Reflect, Uint32Array};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

fn is_ok(v: &JsValue) -> bool {
    get(v, "ok").as_bool() == Some(true)
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if is_ok(v) {
        return false;
    }
    get(&get(v, "error"), "code").as_string().map_or(false, |s| s == code)
}

fn kind(v: &JsValue) -> String {
    get(&get(v, "value"), "kind").as_string().unwrap_or_default()
}

/// Two nodes joined by 0 -> 1.
fn pair() -> Canvas {
    let mut c = Canvas::new();
    assert_eq!(kind(&c.pointer_down_res(0, 100.0, 100.0)), "node_added");
    assert_eq!(kind(&c.pointer_down_res(0, 300.0, 100.0)), "node_added");
    assert_eq!(kind(&c.pointer_down_res(0, 100.0, 100.0)), "connect");
    let r = c.pointer_down_res(0, 300.0, 100.0);
    assert_eq!(get(&get(&get(&r, "value"), "result"), "kind").as_string().as_deref(), Some("created"));
    c
}

#[wasm_bindgen_test]
fn pointer_input_is_validated() {
    let mut c = Canvas::new();
    let ver = c.geom_version();
    assert!(is_err(&c.pointer_down_res(0, f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&c.pointer_down_res(1, 0.0, 0.0), "invalid_button"));
    assert_eq!(c.geom_version(), ver, "state mutated on error");
    assert!(!c.pointer_move(f64::INFINITY, 0.0));
    assert_eq!(c.pointer_up(), None);
    assert_eq!(get(&get(&get(&c.pointer_down_res(0, f64::NAN, 0.0), "error"), "data"), "param").as_string().as_deref(), Some("x"));
}

#[wasm_bindgen_test]
fn far_clicks_and_drags_stay_out_of_the_document() {
    let mut c = pair();
    assert_eq!(kind(&c.pointer_down_res(0, 2.0e7, 0.0)), "missed");
    assert_eq!(c.node_count(), 2);
    assert_eq!(kind(&c.pointer_down_res(2, 100.0, 100.0)), "drag_started");
    assert!(!c.pointer_move(-3.0e7, 0.0));
    assert!(c.pointer_move(120.0, 90.0));
    assert_eq!(c.pointer_up(), Some(0));
    let mut d = Canvas::new();
    assert!(is_ok(&d.load_str_res(&c.to_json_string())));
    assert_eq!(d.node_count(), 2);
}

#[wasm_bindgen_test]
fn clicks_build_a_graph() {
    let c = pair();
    assert_eq!(c.node_count(), 2);
    assert_eq!(c.edge_count(), 1);

    let nodes = Float64Array::from(get(&c.get_node_data(), "positions")).to_vec();
    assert_eq!(nodes, vec![100.0, 100.0, 300.0, 100.0]);
    let edges = c.get_edge_data();
    let ends = Uint32Array::from(get(&edges, "endpoints")).to_vec();
    assert_eq!(ends, vec![0, 1]);
    let geom = c.get_edge_geometry();
    assert_eq!(Float64Array::from(get(&geom, "geometry")).length(), 12);
}

#[wasm_bindgen_test]
fn edge_edits_report_validation_codes() {
    let mut c = pair();
    let r = c.pointer_down_res(2, 200.0, 110.0);
    assert_eq!(kind(&r), "edit_edge");
    assert!(is_err(&c.apply_edge_edit_res(0, 1, "5", "3"), "flow_exceeds_capacity"));
    assert!(is_err(&c.apply_edge_edit_res(0, 1, "-1", "3"), "negative_value"));
    assert!(is_err(&c.apply_edge_edit_res(0, 1, "x", "3"), "parse_error"));
    assert!(is_err(&c.apply_edge_edit_res(1, 0, "1", "3"), "not_found"));
    let r = c.apply_edge_edit_res(0, 1, "3", "5");
    assert!(is_ok(&r));
    assert_eq!(get(&get(&r, "value"), "capacity").as_f64(), Some(5.0));
}

#[wasm_bindgen_test]
fn delete_asks_the_confirm_callback() {
    let mut c = pair();
    c.pointer_down_res(2, 200.0, 110.0);
    assert_eq!(c.describe_selection().as_deref(), Some("Delete edge 1 -> 2?"));
    let no = Function::new_with_args("d", "return false");
    assert_eq!(kind(&c.delete_selected_res(&no)), "cancelled");
    assert_eq!(c.edge_count(), 1);
    let yes = Function::new_with_args("d", "return d.startsWith('Delete')");
    assert_eq!(kind(&c.delete_selected_res(&yes)), "edge_removed");
    assert_eq!(c.edge_count(), 0);
    assert!(is_err(&c.delete_selected_res(&yes), "nothing_selected"));
}

#[wasm_bindgen_test]
fn json_round_trip_and_strict_load() {
    let c = pair();
    let text = c.to_json_string();
    assert_eq!(text, r#"{"edges":{"[0, 1]":{"flow":0,"max_flow":0}},"nodes":[[100,100],[300,100]]}"#);

    let mut d = Canvas::new();
    assert!(is_ok(&d.from_json_res(c.to_json())));
    assert_eq!(d.edge_count(), 1);

    let ver = d.geom_version();
    assert!(is_err(&d.load_str_res(r#"{"nodes": [[0, 0]], "edges": {"[0, 0]": {"flow": 0, "max_flow": 0}}}"#), "malformed_document"));
    assert_eq!(d.geom_version(), ver);
    assert_eq!(d.node_count(), 2);

    d.clear();
    assert_eq!(d.node_count(), 0);
    assert!(d.geom_version() > ver);
}

#[wasm_bindgen_test]
fn config_is_validated() {
    let mut c = Canvas::new();
    let r = c.set_config_res(r#"{"node_radius": -1}"#);
    assert!(is_err(&r, "invalid_config"));
    assert_eq!(get(&get(&get(&r, "error"), "data"), "field").as_string().as_deref(), Some("node_radius"));
    assert!(is_err(&c.set_config_res("{"), "invalid_config"));
    assert!(is_ok(&c.set_config_res(r#"{"node_radius": 10}"#)));
    assert!(flownet_wasm::save_file_name().starts_with("graph_"));
}
