//! Page surface driven by the controller.

use crate::error::FlowError;
use crate::model::{ImageKind, StatRow};

/// Containers the controller can reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Statistics card
    Results,
    /// Plots card
    Plots,
    /// Container wrapping one of the result images
    Preview(ImageKind),
}

/// A file handed to the browser for saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownload {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Everything the controller does to the page.
///
/// Methods take `&self`; DOM handles are shared references and the page is
/// only touched from the UI thread.
pub trait View {
    /// Enter or leave the analyze busy state: trigger disabled/enabled,
    /// label swapped, spinner shown/hidden.
    fn set_busy(&self, busy: bool, label: &str);

    /// Make a container visible. Containers are never hidden again.
    fn reveal(&self, panel: Panel);

    /// Replace the statistics table contents.
    fn set_stats(&self, rows: &[StatRow]);

    /// Point an image element at a data URI.
    fn set_image_source(&self, kind: ImageKind, uri: &str);

    /// Show the error modal with `message`, replacing any previous one.
    fn show_error(&self, message: &str);

    /// Offer `download` to the user. Temporary browser resources must be
    /// released before returning, on success and on failure.
    fn save_file(&self, download: &FileDownload) -> Result<(), FlowError>;
}
