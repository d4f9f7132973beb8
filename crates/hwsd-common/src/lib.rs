//! Shared utilities for the HWSD2 export crates.
//!
//! - **numeric**: rounding, clamping and averaging of optional measurements
//! - **stats**: mode with first-occurrence tie-breaking
//! - **cells**: numeric values of Polars cells when reading frames back out

pub mod cells;
pub mod numeric;
pub mod stats;

pub use cells::cell_number;
pub use numeric::{clamp, mean, round_half_even, round_to_int};
pub use stats::mode_or_first;
