//! Matrix rendering: aligned text tables and LaTeX `tabular` blocks.
//!
//! The data flow is:
//! 1. Raw `Matrix` of `Datum` cells
//! 2. One classification pass (a `CellValue` per cell)
//! 3. Formatted strings and column widths
//! 4. Two assembled artifacts (`RenderedTable`)
//!
//! Rendering is pure: identical inputs produce byte-identical output.
//! The only side effect lives in `write_table`, which prints the
//! enabled artifacts to a caller-supplied sink.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::color::latex_color_cell;
use crate::datum::{CellValue, Datum};
use crate::error::TextabError;
use crate::options::{Axis, MinMaxScope, RenderOptions, ResolvedOptions};
use crate::Result;

/// A rectangular grid of input cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Datum>>", into = "Vec<Vec<Datum>>")]
pub struct Matrix {
    cells: Vec<Vec<Datum>>,
}

impl Matrix {
    /// Create a matrix, checking that every row has the same width.
    pub fn new(cells: Vec<Vec<Datum>>) -> Result<Self> {
        let expected = cells.first().map(|r| r.len()).unwrap_or(0);
        for (row, r) in cells.iter().enumerate() {
            if r.len() != expected {
                return Err(TextabError::RaggedMatrix {
                    row,
                    expected,
                    actual: r.len(),
                });
            }
        }
        Ok(Self { cells })
    }

    /// Build from anything convertible to cell data, e.g.
    /// `Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]])`.
    pub fn from_rows<R, V>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<Datum>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&Datum> {
        self.cells.get(row).and_then(|r| r.get(col))
    }
}

impl TryFrom<Vec<Vec<Datum>>> for Matrix {
    type Error = TextabError;

    fn try_from(cells: Vec<Vec<Datum>>) -> Result<Self> {
        Self::new(cells)
    }
}

impl From<Matrix> for Vec<Vec<Datum>> {
    fn from(matrix: Matrix) -> Self {
        matrix.cells
    }
}

/// The two output artifacts of one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// Plain aligned text table (header line + one line per row)
    pub text: String,
    /// LaTeX `tabular` block; colored cells need `\usepackage{colortbl}`
    pub latex: String,
}

/// Center-pad `text` to `width`, then append the separator.
fn fill_cell(text: &str, width: usize, sep: &str) -> String {
    format!("{:^width$}{}", text, sep)
}

/// Join cells into one LaTeX table row.
fn latex_row(cells: &[String]) -> String {
    format!("{}\\\\ \n", cells.join(" & "))
}

/// Join cells into one text table row.
fn text_row(cells: &[String]) -> String {
    format!("{}\n", cells.join(" "))
}

/// Min/max of the numeric cells in one normalization scope.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

fn extent_of<'a>(values: impl Iterator<Item = &'a CellValue>) -> Option<Extent> {
    let mut extent: Option<Extent> = None;
    for value in values {
        if let CellValue::Numeric(x) = value {
            extent = Some(match extent {
                None => Extent { min: *x, max: *x },
                Some(e) => Extent {
                    min: e.min.min(*x),
                    max: e.max.max(*x),
                },
            });
        }
    }
    extent
}

/// Precomputed min/max per the configured scope.
enum Extents {
    Global(Option<Extent>),
    Rows(Vec<Option<Extent>>),
    Cols(Vec<Option<Extent>>),
}

impl Extents {
    fn compute(cells: &[Vec<CellValue>], cols: usize, scope: MinMaxScope) -> Self {
        match scope {
            MinMaxScope::Global => Extents::Global(extent_of(cells.iter().flatten())),
            MinMaxScope::Row => {
                Extents::Rows(cells.iter().map(|row| extent_of(row.iter())).collect())
            }
            MinMaxScope::Col => Extents::Cols(
                (0..cols)
                    .map(|j| extent_of(cells.iter().map(|row| &row[j])))
                    .collect(),
            ),
        }
    }

    fn for_cell(&self, row: usize, col: usize) -> Option<Extent> {
        match self {
            Extents::Global(extent) => *extent,
            Extents::Rows(extents) => extents[row],
            Extents::Cols(extents) => extents[col],
        }
    }
}

/// Use the supplied labels, or synthesize empty ones.
fn expand_labels(labels: Option<&[String]>, expected: usize, axis: Axis) -> Result<Vec<String>> {
    match labels {
        Some(l) if l.len() != expected => Err(TextabError::LabelLength {
            axis,
            expected,
            actual: l.len(),
        }),
        Some(l) => Ok(l.to_vec()),
        None => Ok(vec![String::new(); expected]),
    }
}

/// Format every cell once, per its classification and resolved format.
fn format_values(cells: &[Vec<CellValue>], resolved: &ResolvedOptions) -> Vec<Vec<String>> {
    cells
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, cell)| match cell {
                    CellValue::Numeric(v) => resolved.format_for(i, j).format_number(*v),
                    CellValue::Text(s) => resolved.format_for(i, j).format_text(s),
                    CellValue::Invalid => String::new(),
                })
                .collect()
        })
        .collect()
}

/// Render the matrix into its text and LaTeX artifacts.
///
/// `column_labels` and `row_labels` default to empty strings when
/// `None`. The configuration is validated in full before the first cell
/// is formatted, so no partial output can escape on error.
pub fn render(
    matrix: &Matrix,
    column_labels: Option<&[String]>,
    row_labels: Option<&[String]>,
    options: &RenderOptions,
) -> Result<RenderedTable> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    let resolved = options.resolve(rows, cols)?;

    let col_labels = expand_labels(column_labels, cols, Axis::Col)?;
    let row_labels = expand_labels(row_labels, rows, Axis::Row)?;

    let cells: Vec<Vec<CellValue>> = matrix
        .cells
        .iter()
        .map(|row| row.iter().map(CellValue::classify).collect())
        .collect();
    let values = format_values(&cells, &resolved);

    // one width for the label column, one shared by all data columns
    let label_width = row_labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let value_width = values
        .iter()
        .flatten()
        .map(|v| v.len())
        .max()
        .unwrap_or(0);
    let cell_width = col_labels
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0)
        .max(value_width);

    let extents = Extents::compute(&cells, cols, resolved.minmax);

    let mut latex = format!("\\begin{{tabular}}{{{}}}\n", "c".repeat(cols + 1));
    let mut text = String::new();

    // header row: empty corner cell, then the column labels
    let mut header_latex = Vec::with_capacity(cols + 1);
    let mut header_text = Vec::with_capacity(cols + 1);
    header_latex.push(fill_cell("", label_width, ""));
    header_text.push(fill_cell("", label_width, &resolved.col_sep));
    for label in &col_labels {
        header_latex.push(fill_cell(label, cell_width, ""));
        header_text.push(fill_cell(label, cell_width, &resolved.col_sep));
    }
    latex.push_str(&latex_row(&header_latex));
    text.push_str(&text_row(&header_text));

    for i in 0..rows {
        let mut row_latex = Vec::with_capacity(cols + 1);
        let mut row_text = Vec::with_capacity(cols + 1);
        row_latex.push(fill_cell(&row_labels[i], label_width, ""));
        row_text.push(fill_cell(&row_labels[i], label_width, &resolved.col_sep));

        for j in 0..cols {
            let value = &values[i][j];
            let color = match &cells[i][j] {
                CellValue::Numeric(v) if resolved.with_color => match extents.for_cell(i, j) {
                    Some(e) => latex_color_cell(
                        *v,
                        e.min,
                        e.max,
                        resolved.scale_for(i, j),
                        resolved.wrap,
                        resolved.colormap,
                    ),
                    None => String::new(),
                },
                _ => String::new(),
            };

            row_text.push(fill_cell(value, cell_width, &resolved.col_sep));
            row_latex.push(fill_cell(&format!("{} {}", color, value), cell_width, ""));
        }

        latex.push_str(&latex_row(&row_latex));
        text.push_str(&text_row(&row_text));
    }

    latex.push_str("\\end{tabular}\n");

    Ok(RenderedTable { text, latex })
}

/// Render and write the enabled artifacts to `sink`, LaTeX first.
///
/// Each artifact is followed by a blank separator line, matching the
/// output shape of printing the buffers one per call. The caller owns
/// any file redirection; the library never opens files itself.
pub fn write_table<W: Write>(
    sink: &mut W,
    matrix: &Matrix,
    column_labels: Option<&[String]>,
    row_labels: Option<&[String]>,
    options: &RenderOptions,
) -> Result<()> {
    let rendered = render(matrix, column_labels, row_labels, options)?;
    if options.emit_latex {
        writeln!(sink, "{}", rendered.latex)?;
    }
    if options.emit_text {
        writeln!(sink, "{}", rendered.text)?;
    }
    Ok(())
}
