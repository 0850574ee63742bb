use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::chars::CharOp;
use crate::compare::Comparison;
use crate::diff::LineOp;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Inline view, one row per line, modified lines shown twice
    #[default]
    Inline,
    /// Plain text listing with statistics
    Text,
    /// Standalone HTML report
    Html,
    /// Ops and statistics as JSON
    Json,
}

pub fn render(cmp: &Comparison, format: OutputFormat, colorize: bool) -> Result<String> {
    match format {
        OutputFormat::Inline => Ok(render_inline(cmp, colorize)),
        OutputFormat::Text => Ok(render_text(cmp)),
        OutputFormat::Html => Ok(render_html(cmp)),
        OutputFormat::Json => render_json(cmp),
    }
}

pub fn render_text(cmp: &Comparison) -> String {
    let stats = &cmp.stats;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("TEXT DIFF RESULTS\n{rule}\n\n"));
    out.push_str("Statistics:\n");
    out.push_str(&format!("- Added: {} lines\n", stats.added));
    out.push_str(&format!("- Removed: {} lines\n", stats.removed));
    out.push_str(&format!("- Modified: {} lines\n", stats.modified));
    out.push_str(&format!("- Unchanged: {} lines\n", stats.unchanged));
    out.push_str(&format!("- Similarity: {}%\n\n", stats.similarity_pct));
    out.push_str(&format!("{rule}\n\n"));

    for op in &cmp.ops {
        match op {
            LineOp::Unchanged { line, .. } => {
                out.push_str(&format!("  {line}\n"));
            }
            LineOp::Added { line, .. } => {
                out.push_str(&format!("+ {line}\n"));
            }
            LineOp::Removed { line, .. } => {
                out.push_str(&format!("- {line}\n"));
            }
            LineOp::Modified { line_a, line_b, .. } => {
                out.push_str(&format!("- {line_a}\n"));
                out.push_str(&format!("+ {line_b}\n"));
            }
        }
    }

    out
}

// Gutter: original line number for unchanged lines, `+`, `-` or `~` otherwise.
pub fn render_inline(cmp: &Comparison, colorize: bool) -> String {
    let mut out = String::new();

    for op in &cmp.ops {
        match op {
            LineOp::Unchanged { line, index_a, .. } => {
                push_row(&mut out, &(index_a + 1).to_string(), line.clone(), colorize);
            }
            LineOp::Added { line, .. } => {
                let content = if colorize {
                    line.green().to_string()
                } else {
                    line.clone()
                };
                push_row(&mut out, "+", content, colorize);
            }
            LineOp::Removed { line, .. } => {
                let content = if colorize {
                    line.red().to_string()
                } else {
                    line.clone()
                };
                push_row(&mut out, "-", content, colorize);
            }
            LineOp::Modified { char_diff, .. } => {
                push_row(&mut out, "~", inline_chars(&char_diff.chars_a, colorize), colorize);
                push_row(&mut out, "", inline_chars(&char_diff.chars_b, colorize), colorize);
            }
        }
    }

    out
}

fn push_row(out: &mut String, gutter: &str, content: String, colorize: bool) {
    let gutter = format!("{gutter:>5}");
    if colorize {
        out.push_str(&format!("{} {content}\n", gutter.dimmed()));
    } else {
        out.push_str(&format!("{gutter} {content}\n"));
    }
}

fn inline_chars(chars: &[CharOp], colorize: bool) -> String {
    if !colorize {
        return chars.iter().map(CharOp::ch).collect();
    }

    chars
        .iter()
        .map(|op| match op {
            CharOp::Same { ch } => ch.to_string(),
            CharOp::Added { ch } => ch.to_string().black().on_green().to_string(),
            CharOp::Removed { ch } => ch.to_string().white().on_red().strikethrough().to_string(),
        })
        .collect()
}

pub fn render_json(cmp: &Comparison) -> Result<String> {
    serde_json::to_string_pretty(cmp).context("Failed to serialize comparison")
}

#[derive(Clone, Copy)]
enum Side {
    Original,
    Changed,
}

pub fn render_html(cmp: &Comparison) -> String {
    let stats = &cmp.stats;
    let mut out = String::new();

    out.push_str(HTML_HEAD);
    out.push_str("    <div class=\"stats\">\n");
    out.push_str(&format!("        <p><strong>Added:</strong> {} lines</p>\n", stats.added));
    out.push_str(&format!("        <p><strong>Removed:</strong> {} lines</p>\n", stats.removed));
    out.push_str(&format!("        <p><strong>Modified:</strong> {} lines</p>\n", stats.modified));
    out.push_str(&format!("        <p><strong>Unchanged:</strong> {} lines</p>\n", stats.unchanged));
    out.push_str(&format!("        <p><strong>Similarity:</strong> {}%</p>\n", stats.similarity_pct));
    out.push_str("    </div>\n");

    for (title, side) in [("Original", Side::Original), ("Changed", Side::Changed)] {
        out.push_str(&format!("    <h2>{title}</h2>\n"));
        out.push_str("    <div class=\"panel\">\n");
        for op in &cmp.ops {
            out.push_str(&format!("        {}\n", html_line(op, side)));
        }
        out.push_str("    </div>\n");
    }

    out.push_str("    <p><em>Generated by textdiff</em></p>\n</body>\n</html>\n");
    out
}

fn html_line(op: &LineOp, side: Side) -> String {
    let (class, number, content) = match (op, side) {
        (LineOp::Unchanged { line, index_a, .. }, Side::Original) => {
            ("unchanged", Some(*index_a), escape_html(line))
        }
        (LineOp::Unchanged { line, index_b, .. }, Side::Changed) => {
            ("unchanged", Some(*index_b), escape_html(line))
        }
        (LineOp::Added { line, index_b }, Side::Changed) => ("added", Some(*index_b), escape_html(line)),
        (LineOp::Removed { line, index_a }, Side::Original) => {
            ("removed", Some(*index_a), escape_html(line))
        }
        (LineOp::Added { .. }, Side::Original) | (LineOp::Removed { .. }, Side::Changed) => {
            ("empty", None, String::new())
        }
        (
            LineOp::Modified {
                index_a, char_diff, ..
            },
            Side::Original,
        ) => ("modified", Some(*index_a), html_chars(&char_diff.chars_a)),
        (
            LineOp::Modified {
                index_b, char_diff, ..
            },
            Side::Changed,
        ) => ("modified", Some(*index_b), html_chars(&char_diff.chars_b)),
    };

    let number = number.map(|n| (n + 1).to_string()).unwrap_or_default();
    format!(
        "<div class=\"diff-line {class}\"><span class=\"line-num\">{number}</span><span class=\"line-content\">{content}</span></div>"
    )
}

fn html_chars(chars: &[CharOp]) -> String {
    let mut out = String::new();
    for op in chars {
        let escaped = escape_html(&op.ch().to_string());
        match op {
            CharOp::Same { .. } => out.push_str(&escaped),
            CharOp::Added { .. } => {
                out.push_str(&format!("<span class=\"char-added\">{escaped}</span>"));
            }
            CharOp::Removed { .. } => {
                out.push_str(&format!("<span class=\"char-removed\">{escaped}</span>"));
            }
        }
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Text Diff Results</title>
    <style>
        body { font-family: monospace; padding: 20px; }
        .stats { margin-bottom: 20px; padding: 10px; background: #f0f0f0; }
        .diff-line { display: flex; }
        .line-num { width: 50px; padding: 2px 10px; background: #f9f9f9; }
        .line-content { padding: 2px 10px; flex: 1; white-space: pre; }
        .added { background: #d4edda; }
        .removed { background: #f8d7da; }
        .modified { background: #fff3cd; }
        .char-added { background: #28a745; color: white; }
        .char-removed { background: #dc3545; color: white; text-decoration: line-through; }
    </style>
</head>
<body>
    <h1>Text Diff Results</h1>
"#;
