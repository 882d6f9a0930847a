//! Global statistics block and its fixed table layout.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Number of rows in the statistics table.
pub const STAT_ROW_COUNT: usize = 11;

/// Whole-image metrics computed by the backend.
///
/// Values are kept as raw JSON numbers and shown the way a browser prints a
/// number: `42` and `13.5` unchanged, an integral float like `30.0` as `30`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Number of detected grains
    pub total_particles: Number,
    /// Grain area over image area, in percent
    pub surface_coverage: Number,
    /// Sum of grain areas (µm²)
    pub total_grain_area: Number,
    /// Total grain area divided by particle count (µm²)
    pub mean_grain_area: Number,
    /// Particles per µm²
    pub particle_density: Number,
    pub mean_area: Number,
    pub median_area: Number,
    pub std_area: Number,
    pub mean_perimeter: Number,
    pub median_perimeter: Number,
    pub std_perimeter: Number,
}

/// One labelled row of the statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
}

impl GlobalStats {
    /// Rows in display order, values rendered verbatim.
    pub fn rows(&self) -> [StatRow; STAT_ROW_COUNT] {
        let row = |label: &'static str, value: &Number| StatRow {
            label,
            value: display_number(value),
        };

        [
            row("Total number of particles", &self.total_particles),
            row("Surface Coverage (%)", &self.surface_coverage),
            row("Total grain area (µm²)", &self.total_grain_area),
            row("Mean grain area (µm²)", &self.mean_grain_area),
            row("Particle density (particles/µm²)", &self.particle_density),
            row("Mean area (µm²)", &self.mean_area),
            row("Median area (µm²)", &self.median_area),
            row("Standard deviation of area (µm²)", &self.std_area),
            row("Mean perimeter (µm)", &self.mean_perimeter),
            row("Median perimeter (µm)", &self.median_perimeter),
            row("Standard deviation of perimeter (µm)", &self.std_perimeter),
        ]
    }
}

/// Render a JSON number without rounding, dropping the `.0` of integral
/// floats.
fn display_number(value: &Number) -> String {
    match value.as_f64() {
        Some(f) if value.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => value.to_string(),
    }
}
