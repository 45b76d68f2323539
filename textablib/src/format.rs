//! Numeric format specs.
//!
//! A format spec is a compact `[width][.precision]kind` string in the
//! spirit of printf: `"1.2f"` is two-decimal fixed point padded to at
//! least one character, `"8.3e"` scientific notation, `"4d"` a rounded
//! integer, `"10s"` plain text. An empty spec falls back to the value's
//! `Display` form. Specs are parsed once, at configuration-resolution
//! time, so a malformed spec fails before any cell is formatted.

use std::str::FromStr;

use crate::error::TextabError;

/// How a numeric value is converted to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatKind {
    /// Fixed-point (`f`)
    #[default]
    Fixed,
    /// Scientific notation (`e`)
    Exponent,
    /// Rounded integer (`d`)
    Integer,
    /// Plain `Display` (`s`, or an empty spec)
    Plain,
}

/// A parsed numeric format spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumFormat {
    /// Minimum field width (values are right-aligned into it)
    pub width: usize,
    /// Digits after the decimal point (`None` = the value's own precision)
    pub precision: Option<usize>,
    /// Conversion kind
    pub kind: FormatKind,
}

impl Default for NumFormat {
    /// The `"1.2f"` spec: two-decimal fixed point.
    fn default() -> Self {
        Self {
            width: 1,
            precision: Some(2),
            kind: FormatKind::Fixed,
        }
    }
}

impl FromStr for NumFormat {
    type Err = TextabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TextabError::InvalidFormat(s.to_string());

        let mut rest = s;
        let width_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let width = if width_end > 0 {
            rest[..width_end].parse().map_err(|_| bad())?
        } else {
            0
        };
        rest = &rest[width_end..];

        let precision = if let Some(stripped) = rest.strip_prefix('.') {
            let prec_end = stripped
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(stripped.len());
            if prec_end == 0 {
                return Err(bad());
            }
            let prec = stripped[..prec_end].parse().map_err(|_| bad())?;
            rest = &stripped[prec_end..];
            Some(prec)
        } else {
            None
        };

        let kind = match rest {
            "f" => FormatKind::Fixed,
            "e" => FormatKind::Exponent,
            "d" => FormatKind::Integer,
            "s" => FormatKind::Plain,
            // a bare width or width.precision means fixed-point
            "" if width > 0 || precision.is_some() => FormatKind::Fixed,
            "" => FormatKind::Plain,
            _ => return Err(bad()),
        };

        Ok(NumFormat {
            width,
            precision,
            kind,
        })
    }
}

impl NumFormat {
    /// Format a numeric value per this spec.
    pub fn format_number(&self, value: f64) -> String {
        let w = self.width;
        match (self.kind, self.precision) {
            (FormatKind::Fixed, Some(p)) => format!("{:>w$.p$}", value),
            (FormatKind::Fixed, None) => format!("{:>w$}", value),
            (FormatKind::Exponent, Some(p)) => format!("{:>w$.p$e}", value),
            (FormatKind::Exponent, None) => format!("{:>w$e}", value),
            (FormatKind::Integer, _) => format!("{:>w$}", value.round() as i64),
            (FormatKind::Plain, Some(p)) => format!("{:>w$.p$}", value),
            (FormatKind::Plain, None) => format!("{:>w$}", value),
        }
    }

    /// Format a text value: width padding only, never a numeric
    /// conversion.
    pub fn format_text(&self, value: &str) -> String {
        let w = self.width;
        format!("{:>w$}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_spec() {
        let fmt: NumFormat = "1.2f".parse().unwrap();
        assert_eq!(fmt.width, 1);
        assert_eq!(fmt.precision, Some(2));
        assert_eq!(fmt.kind, FormatKind::Fixed);
        assert_eq!(fmt, NumFormat::default());
    }

    #[test]
    fn test_parse_variants() {
        let fmt: NumFormat = "8.3e".parse().unwrap();
        assert_eq!((fmt.width, fmt.precision, fmt.kind), (8, Some(3), FormatKind::Exponent));

        let fmt: NumFormat = "4d".parse().unwrap();
        assert_eq!((fmt.width, fmt.precision, fmt.kind), (4, None, FormatKind::Integer));

        let fmt: NumFormat = "10s".parse().unwrap();
        assert_eq!((fmt.width, fmt.precision, fmt.kind), (10, None, FormatKind::Plain));

        let fmt: NumFormat = ".3f".parse().unwrap();
        assert_eq!((fmt.width, fmt.precision, fmt.kind), (0, Some(3), FormatKind::Fixed));

        // bare width.precision defaults to fixed-point
        let fmt: NumFormat = "1.2".parse().unwrap();
        assert_eq!(fmt.kind, FormatKind::Fixed);

        // empty spec is plain Display
        let fmt: NumFormat = "".parse().unwrap();
        assert_eq!((fmt.width, fmt.precision, fmt.kind), (0, None, FormatKind::Plain));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("1.2q".parse::<NumFormat>().is_err());
        assert!("1.f".parse::<NumFormat>().is_err());
        assert!("f2".parse::<NumFormat>().is_err());
        assert!("1.2ff".parse::<NumFormat>().is_err());
    }

    #[test]
    fn test_format_fixed() {
        let fmt: NumFormat = "1.2f".parse().unwrap();
        assert_eq!(fmt.format_number(3.14159), "3.14");
        assert_eq!(fmt.format_number(-1.5), "-1.50");

        let fmt: NumFormat = "7.2f".parse().unwrap();
        assert_eq!(fmt.format_number(3.14159), "   3.14");
    }

    #[test]
    fn test_format_exponent() {
        let fmt: NumFormat = ".2e".parse().unwrap();
        assert_eq!(fmt.format_number(12345.0), "1.23e4");
    }

    #[test]
    fn test_format_integer() {
        let fmt: NumFormat = "d".parse().unwrap();
        assert_eq!(fmt.format_number(3.7), "4");

        let fmt: NumFormat = "4d".parse().unwrap();
        assert_eq!(fmt.format_number(42.0), "  42");
    }

    #[test]
    fn test_format_text_pads_only() {
        let fmt: NumFormat = "6.2f".parse().unwrap();
        assert_eq!(fmt.format_text("abc"), "   abc");
        assert_eq!(fmt.format_text("seven!!"), "seven!!");
    }

    #[test]
    fn test_format_stability() {
        // parsing a formatted value and re-formatting it is a fixpoint
        let fmt: NumFormat = "1.2f".parse().unwrap();
        for v in [1.0, -2.375, 1234.5678, 0.005] {
            let s = fmt.format_number(v);
            let reparsed: f64 = s.trim().parse().unwrap();
            assert_eq!(fmt.format_number(reparsed), s);
        }
    }
}
