//! Controller configuration.
//!
//! Every field has a default matching the stock analysis page, so the page
//! only needs to embed a config block when it deviates (different endpoint
//! paths, element ids or labels). In the browser the block is read from a
//! `<script type="application/json" id="grainview-config">` element.

use serde::{Deserialize, Serialize};

use crate::constants::{self, labels, messages};

/// Log level setting for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Id of the page element holding an optional JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "grainview-config";

/// Top-level controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Console log verbosity
    pub log_level: LogLevel,

    /// Largest file the analyze flow will upload, in bytes
    pub max_upload_bytes: u64,

    pub endpoints: Endpoints,
    pub elements: ElementIds,
    pub text: UiText,
}

/// Backend endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Multipart upload, returns an analysis result
    pub analyze: String,
    /// JSON analysis result in, CSV out
    pub download: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            analyze: constants::ANALYZE_ENDPOINT.to_string(),
            download: constants::DOWNLOAD_ENDPOINT.to_string(),
        }
    }
}

/// Ids of the page elements the controller drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub upload_form: String,
    pub file_input: String,
    pub analyze_button: String,
    pub analyze_text: String,
    pub analyze_spinner: String,
    pub results_card: String,
    pub results_table: String,
    pub segmented_preview: String,
    pub segmented_img: String,
    pub colored_preview: String,
    pub colored_img: String,
    pub plots_card: String,
    pub distribution_plot: String,
    pub download_button: String,
    pub error_modal: String,
    pub error_message: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            upload_form: "uploadForm".to_string(),
            file_input: "imageFile".to_string(),
            analyze_button: "analyzeBtn".to_string(),
            analyze_text: "analyzeText".to_string(),
            analyze_spinner: "analyzeSpinner".to_string(),
            results_card: "resultsCard".to_string(),
            results_table: "resultsTable".to_string(),
            segmented_preview: "segmentedPreview".to_string(),
            segmented_img: "segmentedImg".to_string(),
            colored_preview: "coloredPreview".to_string(),
            colored_img: "coloredImg".to_string(),
            plots_card: "plotsCard".to_string(),
            distribution_plot: "distributionPlot".to_string(),
            download_button: "downloadBtn".to_string(),
            error_modal: "errorModal".to_string(),
            error_message: "errorMessage".to_string(),
        }
    }
}

/// Labels and fallback messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiText {
    pub analyze_idle: String,
    pub analyze_busy: String,
    pub analyze_failed: String,
    pub download_failed: String,
}

impl Default for UiText {
    fn default() -> Self {
        Self {
            analyze_idle: labels::ANALYZE_IDLE.to_string(),
            analyze_busy: labels::ANALYZE_BUSY.to_string(),
            analyze_failed: messages::ANALYZE_FAILED.to_string(),
            download_failed: messages::DOWNLOAD_FAILED.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            max_upload_bytes: constants::DEFAULT_MAX_UPLOAD_BYTES,
            endpoints: Endpoints::default(),
            elements: ElementIds::default(),
            text: UiText::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if config.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Read the config block embedded in the page, falling back to defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_page(document: &web_sys::Document) -> Self {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            log::debug!("No #{} element, using default config", CONFIG_ELEMENT_ID);
            return Self::default();
        };

        let json = element.text_content().unwrap_or_default();
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded configuration from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                log::warn!("Ignoring page configuration: {}", e);
                Self::default()
            }
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
