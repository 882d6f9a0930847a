//! Global constants for the grainview controller

/// Endpoint that accepts the multipart upload and returns an analysis result.
pub const ANALYZE_ENDPOINT: &str = "/";

/// Endpoint that turns a posted analysis result into a CSV file.
pub const DOWNLOAD_ENDPOINT: &str = "/download_csv";

/// Multipart field carrying the image file.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the pixel-to-micron scale factor.
pub const PIXELS_TO_UM_FIELD: &str = "pixels_to_um";

/// Upload limit enforced by the analysis backend (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Suffix appended to the image name for the downloaded CSV.
pub const CSV_FILENAME_SUFFIX: &str = "_measurements.csv";

/// MIME type of the downloaded measurements file.
pub const CSV_MIME: &str = "text/csv";

/// CSS class the page uses to hide an element.
pub const HIDDEN_CLASS: &str = "d-none";

/// Data URI prefix for the photographic previews.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Data URI prefix for the distribution plot.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Button labels
pub mod labels {
    /// Analyze trigger label while idle
    pub const ANALYZE_IDLE: &str = "Analyze Image";
    /// Analyze trigger label while a request is in flight
    pub const ANALYZE_BUSY: &str = "Analyzing...";
}

/// User-facing messages
pub mod messages {
    /// Shown when the form is submitted without a file
    pub const NO_FILE: &str = "Please select an image file";
    /// Shown when the selected file has no name
    pub const EMPTY_FILENAME: &str = "No selected file";
    /// Shown when the scale field holds something other than a positive number
    pub const INVALID_SCALE: &str = "Pixel to micron ratio must be a positive number";
    /// Fallback for any analyze failure without a server message
    pub const ANALYZE_FAILED: &str = "An error occurred during analysis";
    /// Fallback for any download failure without a server message
    pub const DOWNLOAD_FAILED: &str = "Failed to download CSV";
}
