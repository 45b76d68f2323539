//! Error types for textablib

use thiserror::Error;

use crate::options::{Axis, MinMaxScope};

/// Errors that can occur while validating configuration or rendering
#[derive(Error, Debug)]
pub enum TextabError {
    /// Matrix rows have inconsistent lengths
    #[error("matrix row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Label list length does not match the matrix dimension
    #[error("{axis} labels have {actual} entries, expected {expected}")]
    LabelLength {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// Format list length does not match the formatting axis
    #[error("format list has {actual} entries, expected {expected} along the {axis} axis")]
    FormatListLength {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// Malformed numeric format spec
    #[error("invalid format spec '{0}'")]
    InvalidFormat(String),

    /// Color map name not recognized
    #[error("unknown color map '{0}'")]
    UnknownColorMap(String),

    /// Formatting axis name not recognized
    #[error("unknown formatting axis '{0}'")]
    UnknownAxis(String),

    /// Min/max scope name not recognized
    #[error("unknown min/max scope '{0}'")]
    UnknownScope(String),

    /// Wrap factor at or beyond ±1 would divide by zero in the curve ratio
    #[error("color wrap factor {0} is outside (-1, 1)")]
    WrapOutOfRange(f64),

    /// Color scale values must be finite
    #[error("color scale must be finite, got {0}")]
    NonFiniteScale(f64),

    /// Scale list length does not match the min/max scope dimension
    #[error("scale list for '{scope}' scope has {actual} entries, expected {expected}")]
    ScaleLength {
        scope: MinMaxScope,
        expected: usize,
        actual: usize,
    },

    /// Scale shape (list/grid) incompatible with the min/max scope
    #[error("a scale {shape} cannot be used with '{scope}' scope")]
    ScaleShape {
        shape: &'static str,
        scope: MinMaxScope,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
