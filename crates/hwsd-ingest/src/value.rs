//! SQLite value conversions.
//!
//! HWSD2 columns use SQLite's dynamic typing, so every cell is read through
//! `ValueRef` and converted here.

use hwsd_model::CodeValue;
use rusqlite::types::ValueRef;

pub(crate) fn code_from_ref(value: ValueRef<'_>) -> CodeValue {
    match value {
        ValueRef::Null => CodeValue::Missing,
        ValueRef::Integer(v) => CodeValue::Integer(v),
        ValueRef::Real(v) => CodeValue::from_real(v),
        ValueRef::Text(bytes) => CodeValue::from_text(&String::from_utf8_lossy(bytes)),
        ValueRef::Blob(_) => CodeValue::Missing,
    }
}

pub(crate) fn real_from_ref(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(v) => Some(v as f64),
        ValueRef::Real(v) if v.is_nan() => None,
        ValueRef::Real(v) => Some(v),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).trim().parse::<f64>().ok(),
    }
}

pub(crate) fn text_from_ref(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(v) => Some(v.to_string()),
        ValueRef::Real(v) => Some(v.to_string()),
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).trim().to_string()),
    }
}
