//! Configuration file support for ferro-describe.
//!
//! This module provides loading of `.ferro-describe.toml` configuration files
//! which tune the describer.
//!
//! # Example Configuration
//!
//! ```toml
//! [describe]
//! max-length = 50000
//! genetic-code = 1
//! log-level = "debug"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-describe.toml` in current directory
//! 2. `~/.config/ferro/describe.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::error::DescribeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Default upper bound on either input sequence.
pub const DEFAULT_MAX_LENGTH: usize = 100_000;

/// Genetic code used for frame-shift detection unless configured otherwise.
pub const DEFAULT_GENETIC_CODE: u8 = 1;

/// Describer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeConfig {
    /// Maximum length of either sequence (default: 100000).
    pub max_length: usize,
    /// NCBI genetic code table for protein frame-shift detection (default: 1).
    pub genetic_code: u8,
    /// Log filter directive for the binary, when set in a config file.
    pub log_level: Option<String>,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            genetic_code: DEFAULT_GENETIC_CODE,
            log_level: None,
        }
    }
}

impl DescribeConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-describe.toml` in current directory
    /// 2. `~/.config/ferro/describe.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".ferro-describe.toml");
        if cwd_config.exists() {
            match Self::load_from_path(&cwd_config) {
                Ok(config) => return Some(config),
                Err(e) => log::warn!("Ignoring {}: {}", cwd_config.display(), e),
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro").join("describe.toml");
            if home_config.exists() {
                match Self::load_from_path(&home_config) {
                    Ok(config) => return Some(config),
                    Err(e) => log::warn!("Ignoring {}: {}", home_config.display(), e),
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, DescribeError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Only the `[describe]` section is read; unknown keys are skipped.
    pub fn parse(content: &str) -> Result<Self, DescribeError> {
        let mut config = DescribeConfig::default();
        let mut in_describe = false;

        for line in content.lines() {
            let line = strip_comment(line).trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_describe = section.trim() == "describe";
                continue;
            }

            if !in_describe {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                match key {
                    "max-length" => {
                        config.max_length = parse_integer(key, value)?;
                    }
                    "genetic-code" => {
                        config.genetic_code = parse_integer(key, value)?;
                    }
                    "log-level" => {
                        let level = value.trim_matches('"').trim_matches('\'');
                        config.log_level = Some(level.to_string());
                    }
                    _ => {}
                }
            }
        }

        Ok(config)
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        max_length: Option<usize>,
        genetic_code: Option<u8>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            max_length: max_length.unwrap_or(self.max_length),
            genetic_code: genetic_code.unwrap_or(self.genetic_code),
            log_level: log_level
                .map(str::to_string)
                .or_else(|| self.log_level.clone()),
        }
    }
}

/// Drop a trailing `#` comment unless the `#` sits inside a quoted string.
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' | '\'' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_integer<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, DescribeError> {
    value.replace('_', "").parse().map_err(|_| {
        DescribeError::invalid_input(format!("'{}' expects an integer, got '{}'", key, value))
    })
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
