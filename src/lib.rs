//! grainview - browser controller for the grain analysis page
//!
//! Wires the upload form to the analysis backend, renders the returned
//! statistics and images, and exports the measurements as CSV. The flows in
//! [`flow`] are platform independent; the `web` module binds them to the DOM
//! and `fetch` when compiled for `wasm32`.

pub mod config;
pub mod constants;
pub mod error;
pub mod flow;
pub mod model;

pub use config::ControllerConfig;
pub use error::FlowError;
pub use flow::UploadController;
pub use model::AnalysisResult;

#[cfg(target_arch = "wasm32")]
mod web;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
