//! Excel workbook export.
//!
//! One worksheet, header row in bold, numbers as numbers and labels as
//! strings. A missing phase label is written as the number 0, which is how
//! PyAEZ reads "no phase". Workbook metadata carries a fixed creation date
//! so unchanged inputs produce byte-identical files.

use std::path::Path;

use polars::prelude::{AnyValue, DataFrame, DataType};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use hwsd_common::cell_number;
use hwsd_model::PHASE_COLUMNS;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Sheet name of the exported workbook.
pub const SHEET_NAME: &str = "Sheet1";

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: AnyValue<'_>,
    is_phase: bool,
) -> std::result::Result<(), XlsxError> {
    match value {
        AnyValue::Null if is_phase => {
            worksheet.write_number(row, col, 0)?;
        }
        AnyValue::Null => {}
        AnyValue::String(text) => {
            worksheet.write_string(row, col, text)?;
        }
        AnyValue::StringOwned(text) => {
            worksheet.write_string(row, col, text.as_str())?;
        }
        other => match cell_number(&other) {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, other.to_string())?;
            }
        },
    }
    Ok(())
}

fn fill_worksheet(worksheet: &mut Worksheet, data: &DataFrame, path: &Path) -> Result<()> {
    let to_xlsx = |source: XlsxError| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    worksheet.set_name(SHEET_NAME).map_err(to_xlsx)?;
    let header = Format::new().set_bold();

    for (col_idx, column) in data.get_columns().iter().enumerate() {
        let col = col_idx as u16;
        let name = column.name().as_str();
        worksheet
            .write_string_with_format(0, col, name, &header)
            .map_err(to_xlsx)?;

        let is_phase = PHASE_COLUMNS.contains(&name) && column.dtype() == &DataType::String;
        for row_idx in 0..data.height() {
            let value = column.get(row_idx).map_err(|source| OutputError::Column {
                column: name.to_string(),
                source,
            })?;
            write_cell(worksheet, row_idx as u32 + 1, col, value, is_phase).map_err(to_xlsx)?;
        }
    }
    Ok(())
}

/// Write `data` as an XLSX workbook at `path`.
pub fn write_xlsx(data: &DataFrame, path: &Path) -> Result<()> {
    let to_xlsx = |source: XlsxError| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path)?;

    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1).map_err(to_xlsx)?;
    let properties = DocProperties::new()
        .set_title("PyAEZ soil layers")
        .set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, data, path)?;
    workbook.save(path).map_err(to_xlsx)?;
    debug!(path = %path.display(), rows = data.height(), "workbook written");
    Ok(())
}
