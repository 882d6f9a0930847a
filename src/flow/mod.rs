//! Request/response flows behind the analysis page.
//!
//! [`UploadController`] owns the most recent [`AnalysisResult`] and runs the
//! two user-triggered flows against a [`Transport`] and a [`View`]. Both seams
//! are traits so the same controller drives the real page (fetch + DOM) and
//! the host-side fakes used in tests.
//!
//! [`AnalysisResult`]: crate::model::AnalysisResult

mod controller;
mod form;
mod transport;
mod view;

#[cfg(test)]
mod tests;

pub use controller::{Flow, FlowOutcome, UploadController};
pub use form::{SelectedFile, UploadForm, validate_upload};
pub use transport::{HttpResponse, Transport};
pub use view::{FileDownload, Panel, View};
