//! Reading export frames back cell by cell.

use polars::prelude::AnyValue;

/// Numeric value of a frame cell, `None` for nulls and non-numeric cells.
///
/// Text is never parsed: a label such as `"0"` in a phase column stays text.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use hwsd_common::cell_number;
///
/// assert_eq!(cell_number(&AnyValue::Int64(7001)), Some(7001.0));
/// assert_eq!(cell_number(&AnyValue::String("Loam")), None);
/// ```
pub fn cell_number(value: &AnyValue<'_>) -> Option<f64> {
    match *value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        // Codes and counts stay far below 2^53.
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) if v.is_finite() => Some(v),
        AnyValue::Boolean(b) => Some(f64::from(u8::from(b))),
        _ => None,
    }
}
