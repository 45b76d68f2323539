//! # textab
//!
//! CLI for rendering a matrix as an aligned text table and a LaTeX
//! `tabular` block with color-coded cells.
//!
//! ## Usage
//!
//! ```bash
//! # Render a JSON table document
//! textab results.json
//!
//! # Pipe from stdin, LaTeX only, viridis ramp
//! cat results.json | textab --no-text --colormap viridis
//!
//! # Comma-separated text export, no LaTeX
//! textab results.json --no-latex --sep ','
//!
//! # Per-row color normalization with an inverted scale
//! textab results.json --minmax row --scale=-0.5
//! ```
//!
//! ## Input document
//!
//! ```json
//! {
//!   "data": [[80.2, 91.4], [77.1, null]],
//!   "column_labels": ["clean", "noisy"],
//!   "row_labels": ["baseline", "proposed"],
//!   "options": { "colormap": "greys", "scale": 0.5 }
//! }
//! ```
//!
//! Flags override the document's `options` field by field. The LaTeX
//! artifact can be pasted straight into a document; colored cells need
//! `\usepackage{colortbl}`.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use serde::Deserialize;
use textablib::{write_table, Axis, FormatSpec, Matrix, MinMaxScope, RenderOptions, ScaleSpec};

/// A table document: cell data plus optional labels and options.
#[derive(Debug, Deserialize)]
struct TableDocument {
    /// Cell values, row-major
    data: Matrix,
    /// Header labels, one per column
    #[serde(default)]
    column_labels: Option<Vec<String>>,
    /// First-column labels, one per row
    #[serde(default)]
    row_labels: Option<Vec<String>>,
    /// Render options; CLI flags override individual fields
    #[serde(default)]
    options: Option<RenderOptions>,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("textab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a matrix as an aligned text table and a colored LaTeX tabular")
        .arg(
            Arg::new("input")
                .help("JSON table document ('-' or omitted reads stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .action(ArgAction::Append)
                .help("Numeric format spec, e.g. 1.2f (repeat for a per-row/per-column list)"),
        )
        .arg(
            Arg::new("along-col")
                .long("along-col")
                .action(ArgAction::SetTrue)
                .help("Index a format list by column instead of by row"),
        )
        .arg(
            Arg::new("colormap")
                .short('m')
                .long("colormap")
                .help("Color ramp: greys, viridis, bluered, greenred"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .value_parser(clap::value_parser!(f64))
                .allow_hyphen_values(true)
                .help("Color intensity scale (negative inverts the ramp)"),
        )
        .arg(
            Arg::new("wrap")
                .long("wrap")
                .value_parser(clap::value_parser!(f64))
                .allow_hyphen_values(true)
                .help("Color curve wrap factor, strictly inside (-1, 1)"),
        )
        .arg(
            Arg::new("sep")
                .long("sep")
                .help("Extra column separator for the text table (e.g. ',' or a tab)"),
        )
        .arg(
            Arg::new("minmax")
                .long("minmax")
                .value_parser(["global", "row", "col"])
                .help("Scope for color min/max normalization"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable \\cellcolor commands in the LaTeX table"),
        )
        .arg(
            Arg::new("no-latex")
                .long("no-latex")
                .action(ArgAction::SetTrue)
                .help("Skip the LaTeX artifact"),
        )
        .arg(
            Arg::new("no-text")
                .long("no-text")
                .action(ArgAction::SetTrue)
                .help("Skip the text artifact"),
        )
}

/// Read the table document from a file or stdin.
fn read_document(path: &str) -> anyhow::Result<TableDocument> {
    let raw = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?
    };
    serde_json::from_str(&raw).with_context(|| format!("invalid table document '{}'", path))
}

/// Apply flag overrides on top of the document's options.
fn apply_overrides(
    mut options: RenderOptions,
    matches: &ArgMatches,
) -> anyhow::Result<RenderOptions> {
    if let Some(specs) = matches.get_many::<String>("format") {
        let specs: Vec<String> = specs.cloned().collect();
        options.format = if specs.len() == 1 {
            FormatSpec::Single(specs[0].clone())
        } else {
            FormatSpec::List(specs)
        };
    }
    if matches.get_flag("along-col") {
        options.format_axis = Axis::Col;
    }
    if let Some(name) = matches.get_one::<String>("colormap") {
        options.colormap = name.clone();
    }
    if let Some(scale) = matches.get_one::<f64>("scale") {
        options.scale = ScaleSpec::Scalar(*scale);
    }
    if let Some(wrap) = matches.get_one::<f64>("wrap") {
        options.wrap = *wrap;
    }
    if let Some(sep) = matches.get_one::<String>("sep") {
        options.col_sep = sep.clone();
    }
    if let Some(scope) = matches.get_one::<String>("minmax") {
        options.minmax = scope.parse::<MinMaxScope>()?;
    }
    if matches.get_flag("no-color") {
        options.with_color = false;
    }
    if matches.get_flag("no-latex") {
        options.emit_latex = false;
    }
    if matches.get_flag("no-text") {
        options.emit_text = false;
    }
    Ok(options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let document = read_document(input)?;
    let options = apply_overrides(document.options.unwrap_or_default(), matches)?;

    let stdout = std::io::stdout();
    let mut sink = stdout.lock();
    write_table(
        &mut sink,
        &document.data,
        document.column_labels.as_deref(),
        document.row_labels.as_deref(),
        &options,
    )?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", Style::new().red().bold().apply_to("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
