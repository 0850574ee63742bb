use serde::{Deserialize, Serialize};
use tracing::{debug, span, Level};

use crate::diff::{diff_lines, merge_modifications, LineOp};
use crate::normalize::{normalize, NormalizationOptions};
use crate::stats::{compute_stats, DiffStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub ops: Vec<LineOp>,
    pub stats: DiffStats,
}

/// Splits text on `'\n'`. An empty text is a single empty line and a trailing
/// newline leaves a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

pub fn compare(text_a: &str, text_b: &str, opts: &NormalizationOptions) -> Comparison {
    let normalized_a = normalize(text_a, opts);
    let normalized_b = normalize(text_b, opts);
    let lines_a = split_lines(&normalized_a);
    let lines_b = split_lines(&normalized_b);

    let span = span!(
        Level::DEBUG,
        "compare",
        lines_a = lines_a.len(),
        lines_b = lines_b.len(),
        ignore_case = opts.ignore_case,
        ignore_whitespace = opts.ignore_whitespace
    );
    let _guard = span.enter();

    let ops = merge_modifications(diff_lines(&lines_a, &lines_b));
    let stats = compute_stats(&ops);

    debug!(
        added = stats.added,
        removed = stats.removed,
        modified = stats.modified,
        unchanged = stats.unchanged,
        similarity = stats.similarity_pct,
        "Comparison complete"
    );

    Comparison { ops, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![""])]
    #[case("a", vec!["a"])]
    #[case("a\nb", vec!["a", "b"])]
    #[case("a\n", vec!["a", ""])]
    #[case("\n\n", vec!["", "", ""])]
    fn splits_like_the_text_area(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(text), expected);
    }

    #[test]
    fn whitespace_only_changes_disappear_when_ignored() {
        let opts = NormalizationOptions {
            ignore_case: false,
            ignore_whitespace: true,
        };
        let cmp = compare("a  b\n  c", "a b\nc   ", &opts);
        assert!(cmp.stats.is_identical());
        assert_eq!(cmp.stats.similarity_pct, 100);
    }

    #[test]
    fn ops_carry_normalized_text() {
        let opts = NormalizationOptions {
            ignore_case: true,
            ignore_whitespace: false,
        };
        let cmp = compare("HELLO", "Hello", &opts);
        assert_eq!(
            cmp.ops,
            vec![LineOp::Unchanged {
                line: "hello".into(),
                index_a: 0,
                index_b: 0,
            }]
        );
    }
}
