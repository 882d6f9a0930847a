//! Analysis result returned by the backend and the error body it sends on failure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::stats::GlobalStats;
use crate::constants::{CSV_FILENAME_SUFFIX, JPEG_DATA_URI_PREFIX, PNG_DATA_URI_PREFIX};

/// The structured response from the analysis endpoint.
///
/// Decoding is strict: a missing statistic or a wrongly typed field fails the
/// whole decode. Fields this client does not know about are carried in
/// `extra` so the download request posts back everything the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whole-image metrics
    pub global_stats: GlobalStats,

    /// Segmentation overlay, base64 JPEG
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub segmented_image: Option<String>,

    /// Grains colored by label, base64 JPEG
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub colored_image: Option<String>,

    /// Area/perimeter histograms, base64 PNG
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub distribution_plot: Option<String>,

    /// Name of the analysed file, used for the CSV filename
    pub image_name: String,

    /// Per-grain rows, needed by the CSV export
    #[serde(default)]
    pub individual_measurements: Vec<GrainMeasurement>,

    /// Unrecognised fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Measurements of a single grain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainMeasurement {
    pub grain_number: u32,
    pub area: Number,
    pub equivalent_diameter: Number,
    /// Degrees
    pub orientation: Number,
    pub majoraxislength: Number,
    pub minoraxislength: Number,
    pub perimeter: Number,
}

/// Which of the three optional images a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Segmented,
    Colored,
    Distribution,
}

impl ImageKind {
    /// All image kinds in render order.
    pub const ALL: [ImageKind; 3] = [
        ImageKind::Segmented,
        ImageKind::Colored,
        ImageKind::Distribution,
    ];

    /// Data URI prefix for this image's encoding.
    pub fn data_uri_prefix(&self) -> &'static str {
        match self {
            ImageKind::Segmented | ImageKind::Colored => JPEG_DATA_URI_PREFIX,
            ImageKind::Distribution => PNG_DATA_URI_PREFIX,
        }
    }

    /// Build a data URI from a base64 payload.
    pub fn data_uri(&self, base64: &str) -> String {
        format!("{}{}", self.data_uri_prefix(), base64)
    }
}

impl AnalysisResult {
    /// Decode a success body.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encode for the download request.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Base64 payload of the given image, if the server sent one.
    pub fn image(&self, kind: ImageKind) -> Option<&str> {
        match kind {
            ImageKind::Segmented => self.segmented_image.as_deref(),
            ImageKind::Colored => self.colored_image.as_deref(),
            ImageKind::Distribution => self.distribution_plot.as_deref(),
        }
    }

    /// Filename offered for the CSV export.
    pub fn csv_filename(&self) -> String {
        format!("{}{}", self.image_name, CSV_FILENAME_SUFFIX)
    }
}

/// Body of every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    /// Decode an error body. Returns `None` if it is not an `{error}` object.
    pub fn from_json(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
