use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

pub use api::{save_file_name, set_panic_hook};

#[wasm_bindgen]
pub struct Canvas { pub(crate) inner: flownet::Editor }

impl Canvas {
    pub fn rs_new() -> Canvas { Canvas { inner: flownet::Editor::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.graph().geom_version() }
}
