//! Browser implementations of the controller seams (WASM only).

mod dom;
mod fetch;
mod modal;

pub use dom::{DomView, element_by_id};
pub use fetch::{FetchTransport, PageForm};

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
