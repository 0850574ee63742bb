use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use textdiff::utils::{avoid_collision, is_probably_binary, read_text_best_effort};
use textdiff::{build_options, compare, render, Args, Config, DiffStats, OutputFormat};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_input(path: &Path, normalize_eol: bool) -> Result<String> {
    if !path.is_file() {
        bail!("Not a file: {}", path.display());
    }
    if is_probably_binary(path) {
        bail!("{} looks like a binary file; only text can be compared", path.display());
    }
    read_text_best_effort(path, normalize_eol)
}

fn print_summary(stats: &DiffStats) {
    println!();
    println!("== Summary ==");
    println!("Added:      {}", stats.added);
    println!("Removed:    {}", stats.removed);
    println!("Modified:   {}", stats.modified);
    println!("Unchanged:  {}", stats.unchanged);
    println!("Similarity: {}%", stats.similarity_pct);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load(args.config.as_deref())?;
    let opts = build_options(&args, &config)?;

    let text_a = load_input(&args.original, opts.normalize_eol)
        .with_context(|| format!("Invalid original input {}", args.original.display()))?;
    let text_b = load_input(&args.changed, opts.normalize_eol)
        .with_context(|| format!("Invalid changed input {}", args.changed.display()))?;

    if text_a.is_empty() && text_b.is_empty() {
        bail!("Please enter text in both inputs");
    }
    if text_a.is_empty() {
        bail!("Original text is empty");
    }
    if text_b.is_empty() {
        bail!("Changed text is empty");
    }

    opts.limits.check("Original", &text_a)?;
    opts.limits.check("Changed", &text_b)?;
    opts.limits.check_pair(&text_a, &text_b)?;

    let cmp = compare(&text_a, &text_b, &opts.normalization);

    match &opts.output {
        Some(path) => {
            let rendered = render(&cmp, opts.format, false)?;
            let dst = avoid_collision(path);
            if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&dst, rendered)
                .with_context(|| format!("Failed to write {}", dst.display()))?;
            info!(path = %dst.display(), format = ?opts.format, "Diff exported");
            println!("Output at: {}", dst.display());
        }
        None => {
            let colorize = opts.color && io::stdout().is_terminal();
            let rendered = render(&cmp, opts.format, colorize)?;
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            if opts.format == OutputFormat::Inline {
                print_summary(&cmp.stats);
            }
        }
    }

    Ok(())
}
