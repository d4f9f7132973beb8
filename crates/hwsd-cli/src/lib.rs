//! CLI library components for the HWSD2 PyAEZ exporter.

pub mod logging;
pub mod pipeline;
pub mod types;
