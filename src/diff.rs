use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::chars::{diff_chars, CharDiff};
use crate::lcs::{align, Step};

/// Indices are zero-based positions in their own input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineOp {
    Unchanged {
        line: String,
        index_a: usize,
        index_b: usize,
    },
    Added {
        line: String,
        index_b: usize,
    },
    Removed {
        line: String,
        index_a: usize,
    },
    Modified {
        line_a: String,
        line_b: String,
        index_a: usize,
        index_b: usize,
        char_diff: CharDiff,
    },
}

impl LineOp {
    pub fn line_a(&self) -> Option<&str> {
        match self {
            LineOp::Unchanged { line, .. } | LineOp::Removed { line, .. } => Some(line),
            LineOp::Modified { line_a, .. } => Some(line_a),
            LineOp::Added { .. } => None,
        }
    }

    pub fn line_b(&self) -> Option<&str> {
        match self {
            LineOp::Unchanged { line, .. } | LineOp::Added { line, .. } => Some(line),
            LineOp::Modified { line_b, .. } => Some(line_b),
            LineOp::Removed { .. } => None,
        }
    }

    pub fn index_a(&self) -> Option<usize> {
        match self {
            LineOp::Unchanged { index_a, .. }
            | LineOp::Removed { index_a, .. }
            | LineOp::Modified { index_a, .. } => Some(*index_a),
            LineOp::Added { .. } => None,
        }
    }

    pub fn index_b(&self) -> Option<usize> {
        match self {
            LineOp::Unchanged { index_b, .. }
            | LineOp::Added { index_b, .. }
            | LineOp::Modified { index_b, .. } => Some(*index_b),
            LineOp::Removed { .. } => None,
        }
    }
}

pub fn diff_lines<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<LineOp> {
    let a: Vec<&str> = a.iter().map(|line| line.as_ref()).collect();
    let b: Vec<&str> = b.iter().map(|line| line.as_ref()).collect();

    align(&a, &b)
        .into_iter()
        .map(|step| match step {
            Step::Same(index_a, index_b) => LineOp::Unchanged {
                line: a[index_a].to_string(),
                index_a,
                index_b,
            },
            Step::Insert(index_b) => LineOp::Added {
                line: b[index_b].to_string(),
                index_b,
            },
            Step::Delete(index_a) => LineOp::Removed {
                line: a[index_a].to_string(),
                index_a,
            },
        })
        .collect()
}

/// Pairs each `Removed` directly followed by an `Added` into a `Modified`.
/// Pairing is positional, so `R1 R2 A1 A2` yields `R1, Modified(R2, A1), A2`.
pub fn merge_modifications(ops: Vec<LineOp>) -> Vec<LineOp> {
    let mut merged = Vec::with_capacity(ops.len());
    let mut iter = ops.into_iter().peekable();

    while let Some(op) = iter.next() {
        let (line, index_a) = match op {
            LineOp::Removed { line, index_a } => (line, index_a),
            other => {
                merged.push(other);
                continue;
            }
        };

        match iter.next_if(|next| matches!(next, LineOp::Added { .. })) {
            Some(LineOp::Added {
                line: line_b,
                index_b,
            }) => {
                trace!(index_a, index_b, "pairing removed and added lines");
                let char_diff = diff_chars(&line, &line_b);
                merged.push(LineOp::Modified {
                    line_a: line,
                    line_b,
                    index_a,
                    index_b,
                    char_diff,
                });
            }
            _ => merged.push(LineOp::Removed { line, index_a }),
        }
    }

    merged
}
