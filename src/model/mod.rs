//! Data models for the analysis endpoint payloads.

mod analysis;
mod stats;

pub use analysis::{AnalysisResult, ErrorPayload, GrainMeasurement, ImageKind};
pub use stats::{GlobalStats, STAT_ROW_COUNT, StatRow};
