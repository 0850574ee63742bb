use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationOptions {
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
}

impl NormalizationOptions {
    pub fn is_noop(&self) -> bool {
        !self.ignore_case && !self.ignore_whitespace
    }
}

// Case folding runs first. Whitespace is collapsed per line so line
// boundaries survive.
pub fn normalize(text: &str, opts: &NormalizationOptions) -> String {
    if opts.is_noop() {
        return text.to_string();
    }

    let folded = if opts.ignore_case {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    if !opts.ignore_whitespace {
        return folded;
    }

    folded
        .split('\n')
        .map(collapse_whitespace)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
