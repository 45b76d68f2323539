//! # textablib
//!
//! Render a numeric matrix plus row/column labels into two textual
//! presentations: a plain aligned text table, and a LaTeX `tabular`
//! block whose cells can carry a background color encoding magnitude.
//!
//! ## Overview
//!
//! The library is a pure formatting utility. One render call takes a
//! rectangular [`Matrix`] of cells (numbers, text, or missing markers),
//! optional labels, and a [`RenderOptions`] configuration, and produces
//! both artifacts as strings:
//!
//! - **Text table**: center-padded cells, space-joined, with an
//!   optional extra separator for tab- or comma-delimited export.
//! - **LaTeX table**: the same grid as a `tabular` environment, with
//!   `\cellcolor[rgb]{...}` commands on numeric cells. Pasting it into
//!   a document requires `\usepackage{colortbl}`.
//!
//! Cell colors come from normalizing each numeric value against the
//! min/max of a configurable scope (whole matrix, its row, or its
//! column), optionally warping the curve, scaling the intensity, and
//! sampling a named color ramp.
//!
//! Configuration is validated in full before any cell is formatted, so
//! errors never leave partial output behind. Bad cell *data* is not an
//! error: a missing or non-finite cell renders as an empty, uncolored
//! cell and the rest of the table is unaffected.
//!
//! ## Example
//!
//! ```rust
//! use textablib::{render, Matrix, RenderOptions};
//!
//! let matrix = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let cols = vec!["c1".to_string(), "c2".to_string()];
//! let rows = vec!["r1".to_string(), "r2".to_string()];
//!
//! let out = render(&matrix, Some(&cols), Some(&rows), &RenderOptions::default()).unwrap();
//! assert_eq!(out.text.lines().count(), 3);
//! assert!(out.latex.starts_with("\\begin{tabular}{ccc}"));
//! assert!(out.latex.contains("\\cellcolor[rgb]{"));
//! ```

pub mod color;
pub mod datum;
pub mod error;
pub mod format;
pub mod options;
pub mod table;

pub use color::{ColorMap, Rgb};
pub use datum::{CellValue, Datum};
pub use error::TextabError;
pub use format::{FormatKind, NumFormat};
pub use options::{Axis, FormatSpec, MinMaxScope, RenderOptions, ScaleSpec};
pub use table::{render, write_table, Matrix, RenderedTable};

/// Result type for textablib operations
pub type Result<T> = std::result::Result<T, TextabError>;
