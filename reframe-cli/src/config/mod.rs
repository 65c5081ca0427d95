//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use reframe_core::FramerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Delimiter and size limit handed to the framer
    #[serde(default)]
    pub framing: FramerConfig,

    /// Replay configuration
    #[serde(default)]
    pub replay: ReplayConfig,

    /// Sentence log configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Replay-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// Delay between replayed lines in milliseconds
    pub cadence_ms: u64,

    /// Appended to every replayed line, may be empty
    pub line_delimiter: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            cadence_ms: 30,
            line_delimiter: "\r".to_string(),
        }
    }
}

/// Sentence log configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write every delivered sentence to a timestamped file
    pub enabled: bool,

    /// Directory that receives the log files
    pub directory: PathBuf,

    /// Base name, prefixed with the creation timestamp
    pub base_name: String,

    /// Written after each logged sentence
    pub record_separator: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("logs"),
            base_name: "sentences.log".to_string(),
            record_separator: "\r".to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: OutputFormat,

    /// Decode NMEA positions from delivered sentences
    pub decode_nmea: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            decode_nmea: false,
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that can be wrong independently of their type
    pub fn validate(&self) -> Result<()> {
        self.framing.validate().map_err(CliError::from)?;
        if self.logging.enabled && self.logging.base_name.trim().is_empty() {
            return Err(CliError::ConfigError("logging.base_name must not be empty".into()).into());
        }
        Ok(())
    }
}

/// Expand `\r`, `\n`, `\t` and `\\` in a delimiter given on the command line
pub fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                return Err(
                    CliError::ConfigError(format!("unknown escape sequence \\{other}")).into(),
                )
            }
            None => {
                return Err(CliError::ConfigError("trailing backslash in delimiter".into()).into())
            }
        }
    }
    Ok(out)
}
