//! Building plain JS values from Rust data.

use js_sys::{Float64Array, Object, Reflect, Uint32Array};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// A plain object with `fields` set in order.
pub fn object(fields: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in fields {
        // Setting an own property on a fresh plain object cannot throw.
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

pub fn u32s(v: &[u32]) -> JsValue {
    Uint32Array::from(v).into()
}

pub fn f64s(v: &[f64]) -> JsValue {
    Float64Array::from(v).into()
}

/// Flow and capacity values as a `Float64Array`; exact up to 2^53.
pub fn counts(v: &[u64]) -> JsValue {
    let as_f64: Vec<f64> = v.iter().map(|&c| c as f64).collect();
    f64s(&as_f64)
}

/// Plain JS objects and arrays (no `Map`), so results can go through
/// `JSON.stringify` unchanged.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
