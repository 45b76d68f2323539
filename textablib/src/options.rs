//! Render configuration.
//!
//! `RenderOptions` is the user-facing configuration, where scalars may
//! stand in for lists and ramps are addressed by name. `ResolvedOptions`
//! is the validated, expanded form the renderer works from. Resolution
//! happens exactly once per render call, before any cell is touched, so
//! a bad configuration can never produce partial output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ColorMap;
use crate::error::TextabError;
use crate::format::NumFormat;
use crate::Result;

/// Which axis a format list is indexed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// `format[i]` applies to every cell of row `i`
    #[default]
    Row,
    /// `format[j]` applies to every cell of column `j`
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

impl FromStr for Axis {
    type Err = TextabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "row" | "rows" => Ok(Axis::Row),
            "col" | "cols" | "column" | "columns" => Ok(Axis::Col),
            _ => Err(TextabError::UnknownAxis(s.to_string())),
        }
    }
}

/// Which cells define the min/max used for color normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinMaxScope {
    /// Min/max over every numeric cell in the matrix
    #[default]
    Global,
    /// Min/max over the numeric cells of the cell's row
    Row,
    /// Min/max over the numeric cells of the cell's column
    Col,
}

impl fmt::Display for MinMaxScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinMaxScope::Global => write!(f, "global"),
            MinMaxScope::Row => write!(f, "row"),
            MinMaxScope::Col => write!(f, "col"),
        }
    }
}

impl FromStr for MinMaxScope {
    type Err = TextabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "global" => Ok(MinMaxScope::Global),
            "row" => Ok(MinMaxScope::Row),
            "col" | "column" => Ok(MinMaxScope::Col),
            _ => Err(TextabError::UnknownScope(s.to_string())),
        }
    }
}

/// A numeric format: one spec for every cell, or one per row/column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatSpec {
    /// One spec broadcast along the formatting axis
    Single(String),
    /// One spec per row (row axis) or per column (column axis)
    List(Vec<String>),
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec::Single("1.2f".to_string())
    }
}

impl From<&str> for FormatSpec {
    fn from(spec: &str) -> Self {
        FormatSpec::Single(spec.to_string())
    }
}

impl From<Vec<String>> for FormatSpec {
    fn from(specs: Vec<String>) -> Self {
        FormatSpec::List(specs)
    }
}

/// Color scale: uniform, per-row/per-column, or per-cell.
///
/// A `List` is indexed by row under `Row` scope and by column under
/// `Col` scope; a `Grid` is indexed per cell and only meaningful with
/// `Global` scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleSpec {
    /// One scale for every cell
    Scalar(f64),
    /// One scale per row or per column, per the min/max scope
    List(Vec<f64>),
    /// One scale per cell
    Grid(Vec<Vec<f64>>),
}

impl Default for ScaleSpec {
    fn default() -> Self {
        ScaleSpec::Scalar(0.5)
    }
}

/// Configuration for one render call.
///
/// Every field has a default, so `RenderOptions::default()` renders a
/// two-decimal fixed-point table with grey color cells normalized over
/// the whole matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Numeric format spec(s), e.g. `"1.2f"`
    pub format: FormatSpec,
    /// Axis a format list is indexed along
    pub format_axis: Axis,
    /// Emit `\cellcolor` commands for numeric cells
    pub with_color: bool,
    /// Color ramp name: `greys`, `viridis`, `bluered`, `greenred`
    pub colormap: String,
    /// Color intensity scale; negative inverts the ramp direction
    pub scale: ScaleSpec,
    /// Curve-warp factor, strictly inside (-1, 1); 0 is linear
    pub wrap: f64,
    /// Extra separator appended to each text cell (e.g. `"\t"` or `","`)
    pub col_sep: String,
    /// Write the LaTeX artifact in `write_table`
    pub emit_latex: bool,
    /// Write the text artifact in `write_table`
    pub emit_text: bool,
    /// Cells defining the min/max for color normalization
    pub minmax: MinMaxScope,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: FormatSpec::default(),
            format_axis: Axis::Row,
            with_color: true,
            colormap: "greys".to_string(),
            scale: ScaleSpec::default(),
            wrap: 0.0,
            col_sep: String::new(),
            emit_latex: true,
            emit_text: true,
            minmax: MinMaxScope::Global,
        }
    }
}

impl RenderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: one format spec for every cell.
    pub fn format(mut self, spec: impl Into<String>) -> Self {
        self.format = FormatSpec::Single(spec.into());
        self
    }

    /// Builder: one format spec per row/column (see [`Self::along`]).
    pub fn formats(mut self, specs: Vec<String>) -> Self {
        self.format = FormatSpec::List(specs);
        self
    }

    /// Builder: index format lists along the given axis.
    pub fn along(mut self, axis: Axis) -> Self {
        self.format_axis = axis;
        self
    }

    /// Builder: toggle color cells.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.with_color = enabled;
        self
    }

    /// Builder: color ramp by name (validated at render time).
    pub fn colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = name.into();
        self
    }

    /// Builder: uniform color scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = ScaleSpec::Scalar(scale);
        self
    }

    /// Builder: per-row/per-column or per-cell scale.
    pub fn scale_spec(mut self, spec: ScaleSpec) -> Self {
        self.scale = spec;
        self
    }

    /// Builder: curve-warp factor.
    pub fn wrap(mut self, wrap: f64) -> Self {
        self.wrap = wrap;
        self
    }

    /// Builder: extra text-table column separator.
    pub fn col_sep(mut self, sep: impl Into<String>) -> Self {
        self.col_sep = sep.into();
        self
    }

    /// Builder: toggle the LaTeX artifact for `write_table`.
    pub fn emit_latex(mut self, enabled: bool) -> Self {
        self.emit_latex = enabled;
        self
    }

    /// Builder: toggle the text artifact for `write_table`.
    pub fn emit_text(mut self, enabled: bool) -> Self {
        self.emit_text = enabled;
        self
    }

    /// Builder: min/max normalization scope.
    pub fn minmax(mut self, scope: MinMaxScope) -> Self {
        self.minmax = scope;
        self
    }

    /// Validate against a `rows x cols` matrix and expand into the
    /// resolved form.
    pub(crate) fn resolve(&self, rows: usize, cols: usize) -> Result<ResolvedOptions> {
        let axis_len = match self.format_axis {
            Axis::Row => rows,
            Axis::Col => cols,
        };
        let formats = match &self.format {
            FormatSpec::Single(spec) => {
                vec![spec.parse::<NumFormat>()?; axis_len]
            }
            FormatSpec::List(specs) => {
                if specs.len() != axis_len {
                    return Err(TextabError::FormatListLength {
                        axis: self.format_axis,
                        expected: axis_len,
                        actual: specs.len(),
                    });
                }
                specs
                    .iter()
                    .map(|s| s.parse())
                    .collect::<Result<Vec<NumFormat>>>()?
            }
        };

        if !(self.wrap > -1.0 && self.wrap < 1.0) {
            return Err(TextabError::WrapOutOfRange(self.wrap));
        }

        let colormap = self.colormap.parse::<ColorMap>()?;
        let scale = self.resolve_scale(rows, cols)?;

        Ok(ResolvedOptions {
            formats,
            format_axis: self.format_axis,
            with_color: self.with_color,
            colormap,
            scale,
            wrap: self.wrap,
            col_sep: self.col_sep.clone(),
            minmax: self.minmax,
        })
    }

    fn resolve_scale(&self, rows: usize, cols: usize) -> Result<ResolvedScale> {
        let check = |values: &[f64]| -> Result<()> {
            match values.iter().find(|v| !v.is_finite()) {
                Some(v) => Err(TextabError::NonFiniteScale(*v)),
                None => Ok(()),
            }
        };

        match (&self.scale, self.minmax) {
            (ScaleSpec::Scalar(v), _) => {
                check(&[*v])?;
                Ok(ResolvedScale::Uniform(*v))
            }
            (ScaleSpec::List(values), MinMaxScope::Row) => {
                if values.len() != rows {
                    return Err(TextabError::ScaleLength {
                        scope: self.minmax,
                        expected: rows,
                        actual: values.len(),
                    });
                }
                check(values)?;
                Ok(ResolvedScale::PerRow(values.clone()))
            }
            (ScaleSpec::List(values), MinMaxScope::Col) => {
                if values.len() != cols {
                    return Err(TextabError::ScaleLength {
                        scope: self.minmax,
                        expected: cols,
                        actual: values.len(),
                    });
                }
                check(values)?;
                Ok(ResolvedScale::PerCol(values.clone()))
            }
            (ScaleSpec::Grid(grid), MinMaxScope::Global) => {
                if grid.len() != rows {
                    return Err(TextabError::ScaleLength {
                        scope: self.minmax,
                        expected: rows,
                        actual: grid.len(),
                    });
                }
                for row in grid {
                    if row.len() != cols {
                        return Err(TextabError::ScaleLength {
                            scope: self.minmax,
                            expected: cols,
                            actual: row.len(),
                        });
                    }
                    check(row)?;
                }
                Ok(ResolvedScale::PerCell(grid.clone()))
            }
            (ScaleSpec::List(_), MinMaxScope::Global) => Err(TextabError::ScaleShape {
                shape: "list",
                scope: self.minmax,
            }),
            (ScaleSpec::Grid(_), _) => Err(TextabError::ScaleShape {
                shape: "grid",
                scope: self.minmax,
            }),
        }
    }
}

/// Validated, expanded configuration for one `rows x cols` matrix.
///
/// Scalars are broadcast and names resolved exactly once; rendering
/// never re-checks "is this a list".
#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
    /// One parsed format per row (row axis) or per column (column axis)
    pub formats: Vec<NumFormat>,
    pub format_axis: Axis,
    pub with_color: bool,
    pub colormap: ColorMap,
    pub scale: ResolvedScale,
    pub wrap: f64,
    pub col_sep: String,
    pub minmax: MinMaxScope,
}

/// Scale values expanded against the min/max scope.
#[derive(Debug, Clone)]
pub(crate) enum ResolvedScale {
    Uniform(f64),
    PerRow(Vec<f64>),
    PerCol(Vec<f64>),
    PerCell(Vec<Vec<f64>>),
}

impl ResolvedOptions {
    /// Format spec applying to cell `(row, col)`.
    pub fn format_for(&self, row: usize, col: usize) -> &NumFormat {
        match self.format_axis {
            Axis::Row => &self.formats[row],
            Axis::Col => &self.formats[col],
        }
    }

    /// Color scale applying to cell `(row, col)`.
    pub fn scale_for(&self, row: usize, col: usize) -> f64 {
        match &self.scale {
            ResolvedScale::Uniform(v) => *v,
            ResolvedScale::PerRow(values) => values[row],
            ResolvedScale::PerCol(values) => values[col],
            ResolvedScale::PerCell(grid) => grid[row][col],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.format, FormatSpec::Single("1.2f".to_string()));
        assert_eq!(options.format_axis, Axis::Row);
        assert!(options.with_color);
        assert_eq!(options.colormap, "greys");
        assert_eq!(options.scale, ScaleSpec::Scalar(0.5));
        assert_eq!(options.wrap, 0.0);
        assert_eq!(options.col_sep, "");
        assert!(options.emit_latex);
        assert!(options.emit_text);
        assert_eq!(options.minmax, MinMaxScope::Global);
    }

    #[test]
    fn test_builder_chain() {
        let options = RenderOptions::new()
            .format("8.3e")
            .along(Axis::Col)
            .colormap("viridis")
            .scale(-0.4)
            .wrap(0.2)
            .col_sep(",")
            .with_color(false)
            .minmax(MinMaxScope::Row);
        assert_eq!(options.format, FormatSpec::Single("8.3e".to_string()));
        assert_eq!(options.format_axis, Axis::Col);
        assert_eq!(options.colormap, "viridis");
        assert_eq!(options.scale, ScaleSpec::Scalar(-0.4));
        assert_eq!(options.wrap, 0.2);
        assert_eq!(options.col_sep, ",");
        assert!(!options.with_color);
        assert_eq!(options.minmax, MinMaxScope::Row);
    }

    #[test]
    fn test_resolve_broadcasts_single_format() {
        let resolved = RenderOptions::default().resolve(2, 3).unwrap();
        assert_eq!(resolved.formats.len(), 2); // row axis
        assert_eq!(resolved.format_for(1, 2), &NumFormat::default());

        let resolved = RenderOptions::default()
            .along(Axis::Col)
            .resolve(2, 3)
            .unwrap();
        assert_eq!(resolved.formats.len(), 3);
    }

    #[test]
    fn test_resolve_rejects_format_list_mismatch() {
        let options = RenderOptions::new().formats(vec!["1.2f".into(), "1.3f".into()]);
        let err = options.resolve(3, 2).unwrap_err();
        assert!(matches!(
            err,
            TextabError::FormatListLength {
                axis: Axis::Row,
                expected: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_wrap() {
        for wrap in [1.0, -1.0, 1.5, f64::NAN] {
            let err = RenderOptions::new().wrap(wrap).resolve(1, 1).unwrap_err();
            assert!(matches!(err, TextabError::WrapOutOfRange(_)));
        }
    }

    #[test]
    fn test_resolve_rejects_unknown_colormap() {
        let err = RenderOptions::new()
            .colormap("plasma")
            .resolve(1, 1)
            .unwrap_err();
        assert!(matches!(err, TextabError::UnknownColorMap(_)));
    }

    #[test]
    fn test_resolve_scale_list_by_scope() {
        let options = RenderOptions::new()
            .scale_spec(ScaleSpec::List(vec![0.2, 0.4]))
            .minmax(MinMaxScope::Row);
        let resolved = options.resolve(2, 3).unwrap();
        assert_eq!(resolved.scale_for(0, 2), 0.2);
        assert_eq!(resolved.scale_for(1, 0), 0.4);

        let options = RenderOptions::new()
            .scale_spec(ScaleSpec::List(vec![0.2, 0.4, 0.6]))
            .minmax(MinMaxScope::Col);
        let resolved = options.resolve(2, 3).unwrap();
        assert_eq!(resolved.scale_for(1, 2), 0.6);
    }

    #[test]
    fn test_resolve_scale_grid_global() {
        let options =
            RenderOptions::new().scale_spec(ScaleSpec::Grid(vec![vec![0.1, 0.2], vec![0.3, 0.4]]));
        let resolved = options.resolve(2, 2).unwrap();
        assert_eq!(resolved.scale_for(1, 0), 0.3);
    }

    #[test]
    fn test_resolve_rejects_scale_mismatches() {
        let err = RenderOptions::new()
            .scale_spec(ScaleSpec::List(vec![0.2]))
            .minmax(MinMaxScope::Row)
            .resolve(2, 2)
            .unwrap_err();
        assert!(matches!(err, TextabError::ScaleLength { .. }));

        let err = RenderOptions::new()
            .scale_spec(ScaleSpec::List(vec![0.2, 0.3]))
            .resolve(2, 2)
            .unwrap_err();
        assert!(matches!(err, TextabError::ScaleShape { shape: "list", .. }));

        let err = RenderOptions::new()
            .scale_spec(ScaleSpec::Grid(vec![vec![0.2, 0.3]]))
            .minmax(MinMaxScope::Row)
            .resolve(1, 2)
            .unwrap_err();
        assert!(matches!(err, TextabError::ScaleShape { shape: "grid", .. }));

        let err = RenderOptions::new()
            .scale(f64::NAN)
            .resolve(1, 1)
            .unwrap_err();
        assert!(matches!(err, TextabError::NonFiniteScale(_)));
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!(
            "global".parse::<MinMaxScope>().unwrap(),
            MinMaxScope::Global
        );
        assert_eq!("row".parse::<MinMaxScope>().unwrap(), MinMaxScope::Row);
        assert_eq!("column".parse::<MinMaxScope>().unwrap(), MinMaxScope::Col);
        assert!("diagonal".parse::<MinMaxScope>().is_err());
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("rows".parse::<Axis>().unwrap(), Axis::Row);
        assert_eq!("Column".parse::<Axis>().unwrap(), Axis::Col);
        assert!("depth".parse::<Axis>().is_err());
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"scale": [0.2, 0.3], "minmax": "row"}"#).unwrap();
        assert_eq!(options.scale, ScaleSpec::List(vec![0.2, 0.3]));
        assert_eq!(options.minmax, MinMaxScope::Row);
        // untouched fields keep their defaults
        assert_eq!(options.format, FormatSpec::Single("1.2f".to_string()));
        assert!(options.with_color);
    }

    #[test]
    fn test_format_spec_deserialize_untagged() {
        let spec: FormatSpec = serde_json::from_str(r#""1.3f""#).unwrap();
        assert_eq!(spec, FormatSpec::Single("1.3f".to_string()));
        let spec: FormatSpec = serde_json::from_str(r#"["1.2f", "4d"]"#).unwrap();
        assert_eq!(
            spec,
            FormatSpec::List(vec!["1.2f".to_string(), "4d".to_string()])
        );
    }
}
