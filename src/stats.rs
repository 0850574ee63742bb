use serde::{Deserialize, Serialize};

use crate::diff::LineOp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub similarity_pct: u32,
}

impl DiffStats {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified + self.unchanged
    }

    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}

pub fn compute_stats(ops: &[LineOp]) -> DiffStats {
    let mut stats = DiffStats::default();

    for op in ops {
        match op {
            LineOp::Unchanged { .. } => stats.unchanged += 1,
            LineOp::Added { .. } => stats.added += 1,
            LineOp::Removed { .. } => stats.removed += 1,
            LineOp::Modified { .. } => stats.modified += 1,
        }
    }

    stats.similarity_pct = similarity(stats.unchanged, stats.total());
    stats
}

/// `round(100 * part / total)` with halves rounded up; 0 for an empty total.
fn similarity(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (part as u128, total as u128);
    ((200 * part + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 5, 0)]
    #[case(2, 2, 100)]
    #[case(2, 3, 67)]
    #[case(1, 3, 33)]
    #[case(1, 2, 50)]
    #[case(1, 8, 13)]
    #[case(1, 200, 1)]
    #[case(1, 201, 0)]
    fn similarity_rounds_half_up(#[case] part: usize, #[case] total: usize, #[case] pct: u32) {
        assert_eq!(similarity(part, total), pct);
    }

    #[test]
    fn counts_each_kind() {
        let ops = vec![
            LineOp::Unchanged {
                line: "a".into(),
                index_a: 0,
                index_b: 0,
            },
            LineOp::Added {
                line: "b".into(),
                index_b: 1,
            },
            LineOp::Removed {
                line: "c".into(),
                index_a: 1,
            },
            LineOp::Modified {
                line_a: "d".into(),
                line_b: "e".into(),
                index_a: 2,
                index_b: 2,
                char_diff: crate::chars::diff_chars("d", "e"),
            },
        ];

        let stats = compute_stats(&ops);
        assert_eq!(
            stats,
            DiffStats {
                added: 1,
                removed: 1,
                modified: 1,
                unchanged: 1,
                similarity_pct: 25,
            }
        );
        assert_eq!(stats.total(), ops.len());
        assert!(!stats.is_identical());
    }

    #[test]
    fn empty_diff_has_zero_similarity() {
        assert_eq!(compute_stats(&[]), DiffStats::default());
    }
}
