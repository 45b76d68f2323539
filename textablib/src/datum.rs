//! Input cell values and their validity classification.
//!
//! The renderer makes a single classification pass over the matrix,
//! turning every `Datum` into a `CellValue`. Later stages match on the
//! classified variant instead of re-inspecting the raw input at each
//! formatting site.

use serde::{Deserialize, Serialize};

/// One raw input cell: a number, a piece of text, or nothing.
///
/// Serialization is untagged, so JSON `3.5`, `"abc"` and `null` map
/// directly onto the three variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    /// A numeric value
    Number(f64),
    /// A text value
    Text(String),
    /// Missing/unknown marker (JSON `null`)
    Missing,
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Number(value)
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Datum::Number(value as f64)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Datum::Number(f64::from(value))
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::Text(value.to_string())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Datum::Text(value)
    }
}

impl From<Option<f64>> for Datum {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Datum::Number(v),
            None => Datum::Missing,
        }
    }
}

/// A classified cell. The variant decides which format applies and
/// whether a color command is emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Convertible to a finite float; formatted numerically and colored
    Numeric(f64),
    /// Text that does not parse as a finite float; rendered verbatim
    Text(String),
    /// Missing or non-finite; renders as an empty cell, never colored
    Invalid,
}

impl CellValue {
    /// Classify a raw datum.
    ///
    /// Infinities and NaN count as invalid even though they are floats:
    /// they would poison the min/max normalization. Text whose trimmed
    /// content parses as a finite float counts as numeric and is
    /// formatted and colored like any other number.
    pub fn classify(datum: &Datum) -> Self {
        match datum {
            Datum::Number(v) if v.is_finite() => CellValue::Numeric(*v),
            Datum::Number(_) => CellValue::Invalid,
            Datum::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => CellValue::Numeric(v),
                _ => CellValue::Text(s.clone()),
            },
            Datum::Missing => CellValue::Invalid,
        }
    }

    /// The numeric value, if this cell is numeric-valid.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            CellValue::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Check if this cell is numeric-valid.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Numeric(_))
    }
}
