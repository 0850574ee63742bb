//
// lib.rs
// textdiff
//
// Library entry that re-exports the diff engine (normalization, line and character LCS diffs, statistics) together with the renderers, config and CLI parsing used by the binary.
//
// Thales Matheus Mendonça Santos - November 2025
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod chars;
pub mod cli;
pub mod compare;
pub mod config;
pub mod diff;
pub mod export;
mod lcs;
pub mod normalize;
pub mod stats;
pub mod utils;

pub use chars::{diff_chars, CharDiff, CharOp};
pub use cli::{build_options, Args, Options};
pub use compare::{compare, split_lines, Comparison};
pub use config::{Config, Limits};
pub use diff::{diff_lines, merge_modifications, LineOp};
pub use export::{render, OutputFormat};
pub use normalize::{normalize, NormalizationOptions};
pub use stats::{compute_stats, DiffStats};
