//! Result envelopes seen by the canvas shell:
//! `{ok: true, value}` or `{ok: false, error: {code, message, data?}}`.
//! Codes are the core errors' `code()` strings plus a few binding-level ones.

use crate::interop::object;
use flownet::{ConfigError, DocumentError, EditError, GraphError, ValidationError};
use wasm_bindgen::JsValue;

pub type JsResult = Result<JsValue, Failure>;

#[derive(Debug)]
pub struct Failure {
    code: &'static str,
    message: String,
    data: Vec<(&'static str, JsValue)>,
}

impl Failure {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Failure { code, message: message.into(), data: Vec::new() }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<JsValue>) -> Self {
        self.data.push((key, value.into()));
        self
    }

    pub fn non_finite(param: &'static str) -> Self {
        Failure::new("non_finite", format!("parameter '{}' must be finite", param)).with("param", param)
    }

    pub fn invalid_button(got: u8) -> Self {
        Failure::new("invalid_button", "button must be 0 (primary) or 2 (secondary)").with("got", got)
    }

    fn into_js(self) -> JsValue {
        let mut error = vec![("code", JsValue::from_str(self.code)), ("message", JsValue::from(self.message))];
        if !self.data.is_empty() {
            error.push(("data", object(&self.data)));
        }
        object(&[("ok", JsValue::FALSE), ("error", object(&error))])
    }
}

pub fn envelope(result: JsResult) -> JsValue {
    match result {
        Ok(value) => object(&[("ok", JsValue::TRUE), ("value", value)]),
        Err(f) => f.into_js(),
    }
}

impl From<GraphError> for Failure {
    fn from(e: GraphError) -> Self {
        Failure::new(e.code(), e.to_string())
    }
}

impl From<ValidationError> for Failure {
    fn from(e: ValidationError) -> Self {
        Failure::new(e.code(), e.to_string()).with("user_message", e.user_message())
    }
}

impl From<EditError> for Failure {
    fn from(e: EditError) -> Self {
        match e {
            EditError::Graph(g) => g.into(),
            EditError::Validation(v) => v.into(),
        }
    }
}

impl From<DocumentError> for Failure {
    fn from(e: DocumentError) -> Self {
        Failure::new(e.code(), e.to_string())
    }
}

impl From<ConfigError> for Failure {
    fn from(e: ConfigError) -> Self {
        let f = Failure::new(e.code(), e.to_string());
        match e {
            ConfigError::OutOfRange { field, .. } => f.with("field", field),
            ConfigError::Parse(_) => f,
        }
    }
}

impl From<serde_wasm_bindgen::Error> for Failure {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Failure::new("serialize", e.to_string())
    }
}
