//! Obstacle-to-roots depth.
//!
//! `D_ROOTS` codes describe depth ranges; PyAEZ expects a depth in cm, taken
//! as the midpoint of the range (90 for "> 80 cm").

use hwsd_model::CodeValue;

/// (code, depth in cm).
pub const OBSTACLE_DEPTHS_CM: [(i64, i64); 7] = [
    (0, 0),  // no obstacle
    (1, 90), // > 80 cm
    (2, 70), // 60-80 cm
    (3, 50), // 40-60 cm
    (4, 30), // 20-40 cm
    (5, 40), // 0-80 cm
    (6, 10), // 0-20 cm
];

/// Depth in cm for a `ROOTS` code. Reals are truncated; unknown, missing or
/// non-integer text codes are 0.
pub fn obstacle_depth_cm(code: &CodeValue) -> i64 {
    let Some(code) = code.as_integer() else {
        return 0;
    };
    OBSTACLE_DEPTHS_CM
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(0, |(_, depth)| *depth)
}
