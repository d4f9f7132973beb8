//! PyAEZ export row.

use serde::{Deserialize, Serialize};

/// Export columns in order, without the layer tag.
pub const OUTPUT_COLUMNS: [&str; 19] = [
    "CODE", "TXT", "OC", "pH", "TEB", "BS", "CEC_soil", "CEC_clay", "RSD", "SPR", "SPH", "OSD",
    "DRG", "ESP", "EC", "CCB", "GYP", "GRC", "VSP",
];

/// Layer tag column inserted after `CODE` in the combined export.
pub const LAYER_COLUMN: &str = "LAYER";

/// Phase columns; an absent phase is exported as the integer 0.
pub const PHASE_COLUMNS: [&str; 2] = ["SPR", "SPH"];

/// One consolidated soil record for a (mapping unit, depth layer) pair,
/// rounded to its published precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Soil mapping unit id.
    pub code: i64,
    /// USDA texture label, or the raw code when the lookup misses.
    pub txt: String,
    /// Organic carbon %, 3 decimals.
    pub oc: f64,
    /// pH in water, 1 decimal, within [3.0, 11.0].
    pub ph: f64,
    /// Total exchangeable bases, 1 decimal.
    pub teb: f64,
    /// Base saturation %, within [0, 100].
    pub bs: i64,
    pub cec_soil: i64,
    pub cec_clay: i64,
    /// Root-system depth.
    pub rsd: i64,
    /// Rocky/surface phase label.
    pub spr: Option<String>,
    /// Chemical/deep phase label.
    pub sph: Option<String>,
    /// Obstacle-to-roots depth in cm.
    pub osd: i64,
    /// Drainage class.
    pub drg: String,
    /// Exchangeable sodium %, within [0, 100].
    pub esp: i64,
    /// Electrical conductivity.
    pub ec: i64,
    /// Calcium carbonate %.
    pub ccb: i64,
    /// Gypsum %, 1 decimal.
    pub gyp: f64,
    /// Gravel (coarse fragments) %.
    pub grc: i64,
    /// Vertic phase flag (0 or 1).
    pub vsp: i64,
}
