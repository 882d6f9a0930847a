//! Client-side checks on the upload form before anything is sent.

use crate::constants::{PIXELS_TO_UM_FIELD, messages};
use crate::error::FlowError;

/// A file picked in the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Read access to the submitted form.
pub trait UploadForm {
    /// Files currently selected in the file input.
    fn selected_files(&self) -> Vec<SelectedFile>;

    /// Value of a plain form field, `None` if the form has no such field.
    fn field(&self, name: &str) -> Option<String>;
}

/// Reject submissions the backend would refuse anyway.
///
/// Only the first file is uploaded by the backend, so only it is checked.
pub fn validate_upload<F: UploadForm + ?Sized>(
    form: &F,
    max_upload_bytes: u64,
) -> Result<(), FlowError> {
    let files = form.selected_files();
    let Some(file) = files.first() else {
        return Err(FlowError::Validation(messages::NO_FILE.to_string()));
    };

    if file.name.is_empty() {
        return Err(FlowError::Validation(messages::EMPTY_FILENAME.to_string()));
    }

    if file.size > max_upload_bytes {
        return Err(FlowError::Validation(format!(
            "{} is {:.1} MB, larger than the {:.0} MB upload limit",
            file.name,
            megabytes(file.size),
            megabytes(max_upload_bytes)
        )));
    }

    if let Some(scale) = form.field(PIXELS_TO_UM_FIELD) {
        let valid = scale
            .trim()
            .parse::<f64>()
            .is_ok_and(|v| v.is_finite() && v > 0.0);
        if !valid {
            return Err(FlowError::Validation(messages::INVALID_SCALE.to_string()));
        }
    }

    Ok(())
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
