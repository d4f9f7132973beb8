//! Code values.
//!
//! HWSD2 code columns (texture, phases, drainage, roots, WRB classes) are not
//! consistently typed: the same column may hold integers, integral reals or
//! text depending on the release. [`CodeValue`] keeps the value as read so
//! lookups and conversions can decide how to interpret it.
//!
//! A fractional real is truncated toward zero when read as an integer code;
//! numeric text only counts when it is an integer literal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CodeValue {
    Integer(i64),
    /// Finite, non-integral real.
    Real(f64),
    Text(String),
    #[default]
    Missing,
}

impl CodeValue {
    /// Build a code from a real number. Integral reals become integers,
    /// non-finite ones are missing.
    pub fn from_real(value: f64) -> Self {
        if !value.is_finite() {
            return CodeValue::Missing;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            CodeValue::Integer(value as i64)
        } else {
            CodeValue::Real(value)
        }
    }

    /// Build a code from text. Blank text is missing.
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CodeValue::Missing
        } else {
            CodeValue::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CodeValue::Missing)
    }

    /// Integer interpretation of the code.
    ///
    /// Reals are truncated toward zero. Text is accepted only when it parses
    /// as an integer, so `"2.5"` is `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CodeValue::Integer(value) => Some(*value),
            CodeValue::Real(value) if value.abs() < i64::MAX as f64 => Some(value.trunc() as i64),
            CodeValue::Real(_) => None,
            CodeValue::Text(text) => text.trim().parse::<i64>().ok(),
            CodeValue::Missing => None,
        }
    }

    /// Numeric interpretation, used for code columns that carry quantities
    /// (root-system depth).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodeValue::Integer(value) => Some(*value as f64),
            CodeValue::Real(value) => Some(*value),
            CodeValue::Text(text) => text.trim().parse::<f64>().ok(),
            CodeValue::Missing => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CodeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeValue::Integer(value) => write!(f, "{value}"),
            CodeValue::Real(value) => write!(f, "{value}"),
            CodeValue::Text(text) => f.write_str(text),
            CodeValue::Missing => Ok(()),
        }
    }
}

impl CodeValue {
    fn rank(&self) -> u8 {
        match self {
            CodeValue::Integer(_) => 0,
            CodeValue::Real(_) => 1,
            CodeValue::Text(_) => 2,
            CodeValue::Missing => 3,
        }
    }
}

// Reals compare by `total_cmp`, which is equal exactly when the bits are, so
// `Hash` can use `to_bits`.
impl Ord for CodeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CodeValue::Integer(a), CodeValue::Integer(b)) => a.cmp(b),
            (CodeValue::Real(a), CodeValue::Real(b)) => a.total_cmp(b),
            (CodeValue::Text(a), CodeValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CodeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CodeValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CodeValue {}

impl Hash for CodeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CodeValue::Integer(value) => value.hash(state),
            CodeValue::Real(value) => value.to_bits().hash(state),
            CodeValue::Text(text) => text.hash(state),
            CodeValue::Missing => {}
        }
    }
}

impl From<i64> for CodeValue {
    fn from(value: i64) -> Self {
        CodeValue::Integer(value)
    }
}

impl From<&str> for CodeValue {
    fn from(value: &str) -> Self {
        CodeValue::from_text(value)
    }
}

impl<T> From<Option<T>> for CodeValue
where
    T: Into<CodeValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(CodeValue::Missing, Into::into)
    }
}
