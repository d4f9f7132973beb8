//! CSV export via Polars.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, DataType, NamedFrom, SerWriter, Series};
use tracing::debug;

use hwsd_model::PHASE_COLUMNS;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Copy of `data` with missing phase labels replaced by `0`.
pub fn fill_phase_markers(data: &DataFrame) -> Result<DataFrame> {
    let mut filled = data.clone();
    for name in PHASE_COLUMNS {
        let Ok(column) = data.column(name) else {
            continue;
        };
        if column.dtype() != &DataType::String {
            continue;
        }
        let column_error = |source| OutputError::Column {
            column: name.to_string(),
            source,
        };
        let values: Vec<&str> = column
            .str()
            .map_err(column_error)?
            .into_iter()
            .map(|value| value.unwrap_or("0"))
            .collect();
        let series = Series::new(name.into(), values);
        filled.with_column(series).map_err(column_error)?;
    }
    Ok(filled)
}

/// Write `data` as a comma-separated file with a header row.
pub fn write_csv(data: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut filled = fill_phase_markers(data)?;
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut filled)
        .map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), rows = data.height(), "csv written");
    Ok(())
}
