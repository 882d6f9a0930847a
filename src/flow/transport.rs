//! HTTP seam between the controller and the backend.

use super::form::UploadForm;
use crate::error::FlowError;
use crate::model::ErrorPayload;

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx response, or a [`FlowError::Server`] carrying the
    /// decoded `{error}` message when there is one.
    pub fn into_success_body(self) -> Result<Vec<u8>, FlowError> {
        if self.is_success() {
            return Ok(self.body);
        }

        Err(FlowError::Server {
            status: self.status,
            message: ErrorPayload::from_json(&self.body).map(|payload| payload.error),
        })
    }
}

/// Issues the two requests the page makes.
///
/// Futures are driven on the browser's single thread, so they are not
/// required to be `Send`.
#[expect(async_fn_in_trait)]
pub trait Transport {
    /// The form handle submitted by the analyze flow.
    type Form: UploadForm;

    /// POST the form as `multipart/form-data`.
    async fn post_form(&self, url: &str, form: &Self::Form) -> Result<HttpResponse, FlowError>;

    /// POST `body` with `Content-Type: application/json`.
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, FlowError>;
}
