//! PyAEZ soil table export.
//!
//! Writes the combined (or per-layer) soil frames either as an Excel
//! workbook, the format PyAEZ reads, or as CSV.

mod common;
mod csv;
mod error;
mod format;
mod xlsx;

use std::path::Path;

use polars::prelude::DataFrame;

pub use common::{ensure_parent_dir, output_path};
pub use csv::{fill_phase_markers, write_csv};
pub use error::{OutputError, Result};
pub use format::ExportFormat;
pub use xlsx::{SHEET_NAME, write_xlsx};

/// Write `data` to `path` in `format`.
pub fn write_export(data: &DataFrame, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Xlsx => write_xlsx(data, path),
        ExportFormat::Csv => write_csv(data, path),
    }
}
