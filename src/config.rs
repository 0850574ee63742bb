use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::split_lines;
use crate::export::OutputFormat;
use crate::utils::parse_size;

pub const CONFIG_ENV: &str = "TEXTDIFF_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub normalize_eol: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Size string such as `5MB`, `512KiB` or a plain byte count
    pub max_text_size: String,
    pub max_lines: usize,
    /// Largest LCS table, in cells, for the line diff and for one line pair
    pub max_cells: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_size: "5MB".to_string(),
            max_lines: 20_000,
            max_cells: 25_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Inline,
            color: true,
        }
    }
}

impl Config {
    // Explicit path, then $TEXTDIFF_CONFIG, then the user config dir, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("textdiff").join("config.toml"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_text_size: u64,
    pub max_lines: usize,
    pub max_cells: u64,
}

impl Limits {
    pub fn from_config(config: &LimitsConfig) -> Result<Self> {
        let max_text_size = parse_size(&config.max_text_size);
        if max_text_size == 0 {
            bail!("Invalid max_text_size: {:?}", config.max_text_size);
        }
        if config.max_cells == 0 {
            bail!("Invalid max_cells: 0");
        }
        Ok(Self {
            max_text_size,
            max_lines: config.max_lines,
            max_cells: config.max_cells,
        })
    }

    pub fn check(&self, label: &str, text: &str) -> Result<()> {
        let size = text.len() as u64;
        if size > self.max_text_size {
            bail!(
                "{label} text is too large: {size} bytes (limit {} bytes)",
                self.max_text_size
            );
        }
        let lines = split_lines(text).len();
        if lines > self.max_lines {
            bail!(
                "{label} text has too many lines: {lines} (limit {})",
                self.max_lines
            );
        }
        Ok(())
    }

    // The longest line on each side bounds the char table of any modified pair.
    pub fn check_pair(&self, text_a: &str, text_b: &str) -> Result<()> {
        let lines_a = split_lines(text_a);
        let lines_b = split_lines(text_b);

        let cells = table_cells(lines_a.len(), lines_b.len());
        if cells > self.max_cells {
            bail!(
                "Texts are too large to compare: {} x {} lines needs {cells} table cells (limit {})",
                lines_a.len(),
                lines_b.len(),
                self.max_cells
            );
        }

        let longest = |lines: &[&str]| lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let (chars_a, chars_b) = (longest(&lines_a), longest(&lines_b));
        let cells = table_cells(chars_a, chars_b);
        if cells > self.max_cells {
            bail!(
                "Lines are too long to compare: {chars_a} x {chars_b} characters needs {cells} table cells (limit {})",
                self.max_cells
            );
        }
        Ok(())
    }
}

fn table_cells(n: usize, m: usize) -> u64 {
    (n as u64 + 1).saturating_mul(m as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn empty_file_is_all_defaults() -> Result<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn partial_sections_keep_defaults() -> Result<()> {
        let config = Config::parse(
            r#"
            [compare]
            ignore_case = true

            [output]
            format = "html"
            "#,
        )?;

        assert!(config.compare.ignore_case);
        assert!(!config.compare.ignore_whitespace);
        assert_eq!(config.output.format, OutputFormat::Html);
        assert!(config.output.color);
        assert_eq!(config.limits, LimitsConfig::default());
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[compare]\nignore_cases = true\n").is_err());
        assert!(Config::parse("[colours]\n").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/no/such/textdiff.toml"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/textdiff.toml"));
    }

    #[test]
    fn loads_from_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[limits]\nmax_lines = 3\nmax_text_size = \"1KiB\"\nmax_cells = 100\n",
        )?;

        let config = Config::load(Some(path.as_path()))?;
        let limits = Limits::from_config(&config.limits)?;
        assert_eq!(
            limits,
            Limits {
                max_text_size: 1024,
                max_lines: 3,
                max_cells: 100,
            }
        );
        Ok(())
    }

    #[test]
    fn limits_reject_oversized_input() -> Result<()> {
        let limits = Limits {
            max_text_size: 10,
            max_lines: 2,
            max_cells: 100,
        };
        limits.check("Original", "a\nb")?;

        let err = limits.check("Original", "a\nb\nc").unwrap_err();
        assert!(err.to_string().contains("too many lines"));

        let err = limits.check("Changed", "0123456789ab").unwrap_err();
        assert!(err.to_string().starts_with("Changed text is too large"));
        Ok(())
    }

    #[test]
    fn zero_size_limit_is_invalid() {
        let config = LimitsConfig {
            max_text_size: "nothing".into(),
            ..LimitsConfig::default()
        };
        assert!(Limits::from_config(&config).is_err());

        let config = LimitsConfig {
            max_cells: 0,
            ..LimitsConfig::default()
        };
        assert!(Limits::from_config(&config).is_err());
    }

    #[test]
    fn pair_limit_bounds_line_table() -> Result<()> {
        let limits = Limits {
            max_text_size: 1_000,
            max_lines: 100,
            max_cells: 16,
        };
        // 3 x 3 lines needs a 4 x 4 table.
        limits.check_pair("a\nb\nc", "x\ny\nz")?;

        let err = limits.check_pair("a\nb\nc\nd", "x\ny\nz").unwrap_err();
        assert!(err.to_string().starts_with("Texts are too large to compare"));
        Ok(())
    }

    #[test]
    fn pair_limit_bounds_longest_lines() -> Result<()> {
        let limits = Limits {
            max_text_size: 1_000,
            max_lines: 100,
            max_cells: 16,
        };
        limits.check_pair("abc\nx", "xyz")?;
        // Multibyte characters count once.
        limits.check_pair("ééé", "ñññ")?;

        let err = limits.check_pair("abcd", "wxyz").unwrap_err();
        assert!(err.to_string().starts_with("Lines are too long to compare"));
        Ok(())
    }
}
