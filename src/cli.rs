use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use crate::config::{Config, Limits, LimitsConfig};
use crate::export::OutputFormat;
use crate::normalize::NormalizationOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Line and character level text diff", long_about = None)]
pub struct Args {
    /// Original text file (A)
    pub original: PathBuf,

    /// Changed text file (B)
    pub changed: PathBuf,

    /// Compare case-insensitively
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Trim lines and collapse runs of whitespace before comparing
    #[arg(short = 'w', long)]
    pub ignore_whitespace: bool,

    /// Normalize EOL (CRLF/LF) before text comparison
    #[arg(short = 'E', long)]
    pub normalize_eol: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the result to this file instead of stdout (never overwrites)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Max size per input (e.g., 5MB, 512KiB, 102400)
    #[arg(short = 'S', long)]
    pub max_text_size: Option<String>,

    /// Max number of lines per input
    #[arg(short = 'L', long)]
    pub max_lines: Option<usize>,

    /// Max LCS table cells for the line diff and for each modified line pair
    #[arg(short = 'C', long)]
    pub max_cells: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Config file (defaults to $TEXTDIFF_CONFIG or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug)]
pub struct Options {
    pub normalization: NormalizationOptions,
    pub normalize_eol: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub limits: Limits,
    pub color: bool,
}

/// Merges command-line flags over the loaded config. Boolean flags can only
/// switch a setting on; explicit values replace the configured ones.
pub fn build_options(args: &Args, config: &Config) -> Result<Options> {
    let limits_config = LimitsConfig {
        max_text_size: args
            .max_text_size
            .clone()
            .unwrap_or_else(|| config.limits.max_text_size.clone()),
        max_lines: args.max_lines.unwrap_or(config.limits.max_lines),
        max_cells: args.max_cells.unwrap_or(config.limits.max_cells),
    };
    let limits = Limits::from_config(&limits_config).context("Invalid input limits")?;

    Ok(Options {
        normalization: NormalizationOptions {
            ignore_case: args.ignore_case || config.compare.ignore_case,
            ignore_whitespace: args.ignore_whitespace || config.compare.ignore_whitespace,
        },
        normalize_eol: args.normalize_eol || config.compare.normalize_eol,
        format: args.format.unwrap_or(config.output.format),
        output: args.output.clone(),
        limits,
        color: config.output.color && !args.no_color,
    })
}
