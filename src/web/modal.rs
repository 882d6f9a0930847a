//! Binding to the Bootstrap modal the page uses for errors.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `bootstrap.Modal` instance.
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    pub type BootstrapModal;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, js_class = "Modal", catch)]
    pub fn new(element: &web_sys::Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method, js_class = "Modal")]
    pub fn show(this: &BootstrapModal);
}
