//! Color ramps and the LaTeX cell-color command.
//!
//! A ramp maps a scalar in [0, 1] to an RGB color. The pipeline from a
//! cell value to that scalar (normalize against the scope's min/max,
//! warp the curve, apply the scale) lives here too, so the renderer
//! only asks for the finished `\cellcolor` command.

use std::str::FromStr;

use crate::error::TextabError;

/// An RGB color with channels as fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a color, clamping channels to [0, 1].
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Channels as `"R, G, B"` with two decimal places, the form
    /// `\cellcolor[rgb]{...}` expects.
    pub fn to_latex_frac(&self) -> String {
        format!("{:.2}, {:.2}, {:.2}", self.r, self.g, self.b)
    }
}

/// A named continuous color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMap {
    /// White (low) to black (high)
    #[default]
    Greys,
    /// Purple (low) to yellow (high)
    Viridis,
    /// Blue (low) through white to red (high)
    BlueRed,
    /// Green (low) to red (high)
    GreenRed,
}

/// Viridis-like interpolation stops, low to high.
const VIRIDIS_STOPS: [(f64, f64, f64); 8] = [
    (0.27, 0.00, 0.33),
    (0.28, 0.14, 0.45),
    (0.26, 0.24, 0.53),
    (0.22, 0.34, 0.55),
    (0.18, 0.44, 0.56),
    (0.12, 0.56, 0.55),
    (0.20, 0.72, 0.47),
    (0.99, 0.91, 0.15),
];

impl ColorMap {
    /// Sample the ramp at `t`, clamped to [0, 1].
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            ColorMap::Greys => Rgb::new(1.0 - t, 1.0 - t, 1.0 - t),
            ColorMap::Viridis => sample_stops(&VIRIDIS_STOPS, t),
            ColorMap::BlueRed => {
                if t < 0.5 {
                    let s = t * 2.0;
                    Rgb::new(s, s, 1.0)
                } else {
                    let s = (t - 0.5) * 2.0;
                    Rgb::new(1.0, 1.0 - s, 1.0 - s)
                }
            }
            ColorMap::GreenRed => Rgb::new(t, 1.0 - t, 0.0),
        }
    }
}

impl FromStr for ColorMap {
    type Err = TextabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greys" | "grays" | "greyscale" | "grayscale" => Ok(ColorMap::Greys),
            "viridis" => Ok(ColorMap::Viridis),
            "bluered" | "blue-red" => Ok(ColorMap::BlueRed),
            "greenred" | "green-red" => Ok(ColorMap::GreenRed),
            _ => Err(TextabError::UnknownColorMap(s.to_string())),
        }
    }
}

/// Piecewise-linear interpolation between ramp stops.
fn sample_stops(stops: &[(f64, f64, f64)], t: f64) -> Rgb {
    let segments = stops.len() - 1;
    let idx = ((t * segments as f64) as usize).min(segments - 1);
    let frac = t * segments as f64 - idx as f64;
    let (r1, g1, b1) = stops[idx];
    let (r2, g2, b2) = stops[idx + 1];
    Rgb::new(r1, g1, b1).lerp(&Rgb::new(r2, g2, b2), frac)
}

/// Reshape a normalized value in [0, 1] along a perceptual-style curve.
///
/// `wrap = 0` is the identity. Positive wrap concentrates color
/// resolution at the low end of the range (mel-scale-like), negative
/// wrap at the high end. The caller guarantees `wrap` lies strictly
/// inside (-1, 1); the endpoints would divide by zero in the ratio.
pub fn wrap_value(t: f64, wrap: f64) -> f64 {
    if wrap == 0.0 {
        return t;
    }
    let ratio = (1.0 + wrap) / (1.0 - wrap);
    (1.0 - (1.0 - t).powf(ratio)).powf(1.0 / ratio)
}

/// Normalized, wrapped, scaled color intensity for a cell value.
///
/// When the scope is degenerate (`max <= min`) the normalized value is
/// defined to be 0. A negative scale inverts the mapping: the minimum
/// lands at `|scale|` and the maximum at 0.
pub fn intensity(value: f64, min: f64, max: f64, scale: f64, wrap: f64) -> f64 {
    let span = max - min;
    let t = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let t = wrap_value(t, wrap);
    if scale < 0.0 {
        -scale - t * -scale
    } else {
        t * scale
    }
}

/// Map a cell value onto the ramp and return the LaTeX color command.
pub fn latex_color_cell(
    value: f64,
    min: f64,
    max: f64,
    scale: f64,
    wrap: f64,
    map: ColorMap,
) -> String {
    let rgb = map.sample(intensity(value, min, max, scale, wrap));
    format!("\\cellcolor[rgb]{{{}}}", rgb.to_latex_frac())
}
