//! Soil mapping unit id lists.
//!
//! Accepts plain text (one id per line) or CSV (ids in any column). A first
//! line without any numeric cell is treated as a header. Blank cells and lines
//! starting with `#` are ignored.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use hwsd_model::SmuSelection;

use crate::{IngestError, Result};

pub fn read_smu_ids(path: &Path) -> Result<SmuSelection> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|source| IngestError::IdList {
            path: path.to_path_buf(),
            source,
        })?;
    let mut ids = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::IdList {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record
            .position()
            .map_or(index as u64 + 1, csv::Position::line);
        let cells: Vec<&str> = record.iter().filter(|cell| !cell.is_empty()).collect();
        if cells.is_empty() {
            continue;
        }
        if index == 0 && cells.iter().all(|cell| cell.parse::<i64>().is_err()) {
            continue;
        }
        for cell in cells {
            let id = cell.parse::<i64>().map_err(|_| IngestError::InvalidSmuId {
                path: path.to_path_buf(),
                line,
                value: cell.to_string(),
            })?;
            ids.push(id);
        }
    }
    Ok(SmuSelection::new(ids))
}
