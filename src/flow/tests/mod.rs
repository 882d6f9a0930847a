//! Host-side fakes and flow tests.

mod render_tests;

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::poll_fn;
use std::task::Poll;

use super::{FileDownload, HttpResponse, Panel, SelectedFile, Transport, UploadController, UploadForm, View};
use crate::config::ControllerConfig;
use crate::error::FlowError;
use crate::model::{ImageKind, StatRow};

/// Form with scripted files and fields.
#[derive(Debug, Clone, Default)]
pub struct FakeForm {
    files: Vec<SelectedFile>,
    fields: HashMap<String, String>,
}

impl FakeForm {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_file(name: &str, size: u64) -> Self {
        Self {
            files: vec![SelectedFile {
                name: name.to_string(),
                size,
            }],
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}

impl UploadForm for FakeForm {
    fn selected_files(&self) -> Vec<SelectedFile> {
        self.files.clone()
    }

    fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}

/// A request seen by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Form { url: String, file_names: Vec<String> },
    Json { url: String, body: String },
}

/// Transport that replays scripted responses in order.
///
/// When gated, every request stays pending until [`FakeTransport::open_gate`].
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, FlowError>>>,
    requests: RefCell<Vec<RecordedRequest>>,
    gated: bool,
    gate_open: Cell<bool>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: FlowError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn open_gate(&self) {
        self.gate_open.set(true);
    }

    pub fn close_gate(&self) {
        self.gate_open.set(false);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    async fn next_response(&self) -> Result<HttpResponse, FlowError> {
        if self.gated {
            poll_fn(|_| {
                if self.gate_open.get() {
                    Poll::Ready(())
                } else {
                    Poll::Pending
                }
            })
            .await;
        }

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FlowError::Transport("no scripted response".into())))
    }
}

impl Transport for FakeTransport {
    type Form = FakeForm;

    async fn post_form(&self, url: &str, form: &FakeForm) -> Result<HttpResponse, FlowError> {
        self.requests.borrow_mut().push(RecordedRequest::Form {
            url: url.to_string(),
            file_names: form.files.iter().map(|f| f.name.clone()).collect(),
        });
        self.next_response().await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, FlowError> {
        self.requests.borrow_mut().push(RecordedRequest::Json {
            url: url.to_string(),
            body,
        });
        self.next_response().await
    }
}

/// Something the controller did to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Busy(bool, String),
    Reveal(Panel),
    Stats(Vec<StatRow>),
    Image(ImageKind, String),
    Error(String),
    Save(FileDownload),
}

/// View that records every call.
#[derive(Default)]
pub struct RecordingView {
    events: RefCell<Vec<ViewEvent>>,
    save_error: Option<FlowError>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_save(error: FlowError) -> Self {
        Self {
            save_error: Some(error),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Busy state after the last `set_busy` call, with its label.
    pub fn last_busy(&self) -> Option<(bool, String)> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Busy(busy, label) => Some((busy, label)),
            _ => None,
        })
    }

    pub fn revealed(&self, panel: Panel) -> bool {
        self.events().contains(&ViewEvent::Reveal(panel))
    }

    pub fn images(&self) -> Vec<(ImageKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Image(kind, uri) => Some((kind, uri)),
                _ => None,
            })
            .collect()
    }

    pub fn last_stats(&self) -> Option<Vec<StatRow>> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Stats(rows) => Some(rows),
            _ => None,
        })
    }

    pub fn saved(&self) -> Vec<FileDownload> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Save(download) => Some(download),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl View for RecordingView {
    fn set_busy(&self, busy: bool, label: &str) {
        self.push(ViewEvent::Busy(busy, label.to_string()));
    }

    fn reveal(&self, panel: Panel) {
        self.push(ViewEvent::Reveal(panel));
    }

    fn set_stats(&self, rows: &[StatRow]) {
        self.push(ViewEvent::Stats(rows.to_vec()));
    }

    fn set_image_source(&self, kind: ImageKind, uri: &str) {
        self.push(ViewEvent::Image(kind, uri.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.push(ViewEvent::Error(message.to_string()));
    }

    fn save_file(&self, download: &FileDownload) -> Result<(), FlowError> {
        self.push(ViewEvent::Save(download.clone()));
        match &self.save_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub type TestController = UploadController<FakeTransport, RecordingView>;

pub fn controller(transport: FakeTransport) -> TestController {
    UploadController::new(transport, RecordingView::new(), ControllerConfig::default())
}

pub fn image_form() -> FakeForm {
    FakeForm::with_file("sample1.jpg", 120_000).with_field("pixels_to_um", "0.5")
}

pub const STATS_JSON: &str = r#"{
    "total_particles": 42,
    "surface_coverage": 13.5,
    "total_grain_area": 1520.25,
    "mean_grain_area": 36.2,
    "particle_density": 0.000731,
    "mean_area": 36.2,
    "median_area": 30.5,
    "std_area": 12.75,
    "mean_perimeter": 21.4,
    "median_perimeter": 20.1,
    "std_perimeter": 4.1
}"#;

/// Analysis result body without any images.
pub fn bare_result_json(image_name: &str) -> String {
    format!(
        r#"{{
            "global_stats": {STATS_JSON},
            "image_name": "{image_name}",
            "individual_measurements": [
                {{ "grain_number": 1, "area": 40.5, "equivalent_diameter": 7.18,
                   "orientation": 33.1, "majoraxislength": 8.2,
                   "minoraxislength": 6.3, "perimeter": 22.0 }}
            ]
        }}"#
    )
}

/// Analysis result body with all three images.
pub fn full_result_json(image_name: &str) -> String {
    format!(
        r#"{{
            "global_stats": {STATS_JSON},
            "image_name": "{image_name}",
            "segmented_image": "U0VH",
            "colored_image": "Q09M",
            "distribution_plot": "UExU",
            "individual_measurements": []
        }}"#
    )
}
