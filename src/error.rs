//! Error types for the analyze and download flows.

use thiserror::Error;

/// Everything that can end a flow early.
///
/// Every variant ends up in the error modal; [`FlowError::user_message`]
/// picks the text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-success status. `message` is the server's `error` field, if the
    /// body could be decoded.
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("<undecodable body>"))]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the `{error}` payload
        message: Option<String>,
    },

    /// Success status but the body did not match the expected schema
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The browser refused to hand the file to the user
    #[error("Download failed: {0}")]
    Save(String),
}

impl FlowError {
    /// Text shown in the modal. Validation and non-empty server messages are
    /// shown as is; everything else gets the flow's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FlowError::Validation(message) => message.clone(),
            FlowError::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(e: serde_json::Error) -> Self {
        FlowError::Decode(e.to_string())
    }
}
