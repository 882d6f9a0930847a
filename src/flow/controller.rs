//! The upload controller and its two flows.

use std::cell::{Cell, RefCell};

use super::form::validate_upload;
use super::transport::Transport;
use super::view::{FileDownload, Panel, View};
use crate::config::{ControllerConfig, UiText};
use crate::constants::CSV_MIME;
use crate::error::FlowError;
use crate::model::{AnalysisResult, ImageKind};

/// The two user-triggered request cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Analyze,
    Download,
}

impl Flow {
    fn name(&self) -> &'static str {
        match self {
            Flow::Analyze => "Analyze",
            Flow::Download => "Download",
        }
    }
}

/// How a flow invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Request made and handled successfully
    Completed,
    /// Nothing to do (download without a result)
    Skipped,
    /// Another request of the same flow is still in flight
    Rejected,
    /// The error was shown in the modal
    Failed(FlowError),
}

/// Marks a flow as in flight for as long as it is alive.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Holds the analyze trigger in its busy state; restores idle on drop so
/// every exit path, including `?` returns, resets the button.
struct BusyGuard<'a, V: View> {
    view: &'a V,
    idle_label: &'a str,
}

impl<'a, V: View> BusyGuard<'a, V> {
    fn enter(view: &'a V, text: &'a UiText) -> Self {
        view.set_busy(true, &text.analyze_busy);
        Self {
            view,
            idle_label: &text.analyze_idle,
        }
    }
}

impl<V: View> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false, self.idle_label);
    }
}

/// Owns the latest analysis result and runs the analyze and download flows.
///
/// All state uses interior mutability so a single `Rc<UploadController>` can
/// be shared between event callbacks on the UI thread. At most one request
/// per flow is in flight at any time; extra triggers are rejected.
pub struct UploadController<T: Transport, V: View> {
    transport: T,
    view: V,
    config: ControllerConfig,
    current_results: RefCell<Option<AnalysisResult>>,
    analyze_in_flight: Cell<bool>,
    download_in_flight: Cell<bool>,
}

impl<T: Transport, V: View> UploadController<T, V> {
    pub fn new(transport: T, view: V, config: ControllerConfig) -> Self {
        Self {
            transport,
            view,
            config,
            current_results: RefCell::new(None),
            analyze_in_flight: Cell::new(false),
            download_in_flight: Cell::new(false),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// The result of the last successful analysis, if any.
    pub fn current_results(&self) -> Option<AnalysisResult> {
        self.current_results.borrow().clone()
    }

    /// Whether a request of `flow` is currently in flight.
    pub fn is_in_flight(&self, flow: Flow) -> bool {
        match flow {
            Flow::Analyze => self.analyze_in_flight.get(),
            Flow::Download => self.download_in_flight.get(),
        }
    }

    /// Handle a submit of the upload form.
    ///
    /// Validates the selection, uploads it, stores and renders the result.
    /// Any failure goes to the error modal and leaves the stored result as
    /// it was. The trigger always ends up idle again.
    pub async fn handle_analyze_submit(&self, form: &T::Form) -> FlowOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.analyze_in_flight) else {
            log::warn!("Analyze already in flight, ignoring submit");
            return FlowOutcome::Rejected;
        };

        match self.run_analyze(form).await {
            Ok(()) => FlowOutcome::Completed,
            Err(e) => self.fail(Flow::Analyze, e),
        }
    }

    async fn run_analyze(&self, form: &T::Form) -> Result<(), FlowError> {
        validate_upload(form, self.config.max_upload_bytes)?;

        let _busy = BusyGuard::enter(&self.view, &self.config.text);

        log::info!("Uploading image to {}", self.config.endpoints.analyze);
        let response = self
            .transport
            .post_form(&self.config.endpoints.analyze, form)
            .await?;
        log::debug!(
            "Analyze response: status {}, {} bytes",
            response.status,
            response.body.len()
        );

        let body = response.into_success_body()?;
        let result = AnalysisResult::from_json(&body)?;

        log::info!(
            "Analysis of {} complete: {} particles, {} grain rows",
            result.image_name,
            result.global_stats.total_particles,
            result.individual_measurements.len()
        );

        self.render(&result);
        *self.current_results.borrow_mut() = Some(result);
        Ok(())
    }

    /// Handle a click on the download button.
    ///
    /// Posts the current result back to the server and saves the returned
    /// CSV. Does nothing when no analysis has succeeded yet.
    pub async fn handle_download_click(&self) -> FlowOutcome {
        // Encoded up front so no borrow is held across the request.
        let request = self
            .current_results
            .borrow()
            .as_ref()
            .map(|result| (result.to_json(), result.csv_filename()));

        let Some((body, filename)) = request else {
            log::debug!("Download clicked without a result, ignoring");
            return FlowOutcome::Skipped;
        };

        let Some(_in_flight) = InFlight::acquire(&self.download_in_flight) else {
            log::warn!("Download already in flight, ignoring click");
            return FlowOutcome::Rejected;
        };

        match self.run_download(body, filename).await {
            Ok(()) => FlowOutcome::Completed,
            Err(e) => self.fail(Flow::Download, e),
        }
    }

    async fn run_download(
        &self,
        body: Result<String, serde_json::Error>,
        filename: String,
    ) -> Result<(), FlowError> {
        let body = body?;

        log::info!("Requesting {} from {}", filename, self.config.endpoints.download);
        let response = self
            .transport
            .post_json(&self.config.endpoints.download, body)
            .await?;
        let bytes = response.into_success_body()?;

        log::debug!("Saving {} ({} bytes)", filename, bytes.len());
        self.view.save_file(&FileDownload {
            filename,
            mime: CSV_MIME,
            bytes,
        })
    }

    /// Show `result` on the page.
    ///
    /// Statistics are always written; images only when present. Nothing is
    /// hidden, so panels from an earlier result stay visible.
    pub fn render(&self, result: &AnalysisResult) {
        self.view.reveal(Panel::Results);
        self.view.reveal(Panel::Plots);

        self.view.set_stats(&result.global_stats.rows());

        for kind in ImageKind::ALL {
            if let Some(payload) = result.image(kind) {
                self.view.reveal(Panel::Preview(kind));
                self.view.set_image_source(kind, &kind.data_uri(payload));
            }
        }
    }

    /// Put `message` in the error modal.
    pub fn show_error(&self, message: &str) {
        self.view.show_error(message);
    }

    fn fail(&self, flow: Flow, error: FlowError) -> FlowOutcome {
        let fallback = match flow {
            Flow::Analyze => &self.config.text.analyze_failed,
            Flow::Download => &self.config.text.download_failed,
        };

        match &error {
            FlowError::Validation(message) => log::info!("{}: {}", flow.name(), message),
            other => log::warn!("{} failed: {}", flow.name(), other),
        }

        self.show_error(&error.user_message(fallback));
        FlowOutcome::Failed(error)
    }
}
