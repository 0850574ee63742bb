use serde::{Deserialize, Serialize};

use crate::lcs::{align, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CharOp {
    Same { ch: char },
    Added { ch: char },
    Removed { ch: char },
}

impl CharOp {
    pub fn ch(&self) -> char {
        match self {
            CharOp::Same { ch } | CharOp::Added { ch } | CharOp::Removed { ch } => *ch,
        }
    }

    pub fn is_same(&self) -> bool {
        matches!(self, CharOp::Same { .. })
    }
}

/// `chars_a` holds only `Same`/`Removed`, `chars_b` only `Same`/`Added`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharDiff {
    pub chars_a: Vec<CharOp>,
    pub chars_b: Vec<CharOp>,
}

impl CharDiff {
    pub fn text_a(&self) -> String {
        self.chars_a
            .iter()
            .filter(|op| !matches!(op, CharOp::Added { .. }))
            .map(CharOp::ch)
            .collect()
    }

    pub fn text_b(&self) -> String {
        self.chars_b
            .iter()
            .filter(|op| !matches!(op, CharOp::Removed { .. }))
            .map(CharOp::ch)
            .collect()
    }
}

pub fn diff_chars(line_a: &str, line_b: &str) -> CharDiff {
    let a: Vec<char> = line_a.chars().collect();
    let b: Vec<char> = line_b.chars().collect();

    let mut diff = CharDiff {
        chars_a: Vec::with_capacity(a.len()),
        chars_b: Vec::with_capacity(b.len()),
    };

    for step in align(&a, &b) {
        match step {
            Step::Same(i, _) => {
                diff.chars_a.push(CharOp::Same { ch: a[i] });
                diff.chars_b.push(CharOp::Same { ch: a[i] });
            }
            Step::Insert(j) => diff.chars_b.push(CharOp::Added { ch: b[j] }),
            Step::Delete(i) => diff.chars_a.push(CharOp::Removed { ch: a[i] }),
        }
    }

    diff
}
