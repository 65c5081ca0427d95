//! Configuration types for the framer

use crate::error::{FramerError, Result};

/// Default sentence delimiter, the common terminator on serial links
pub const DEFAULT_DELIMITER: &str = "\r";

/// Default upper bound on a single sentence, in bytes
pub const DEFAULT_MAX_SENTENCE_SIZE: usize = 2048;

/// Framer configuration
///
/// Fixed for the life of a framer. Fields are public so the configuration can
/// be assembled from a file, and are checked by [`FramerConfig::validate`]
/// when a framer is built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FramerConfig {
    /// Marker terminating every sentence
    pub delimiter: String,
    /// Maximum sentence size in bytes, delimiter included
    pub max_sentence_size: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            max_sentence_size: DEFAULT_MAX_SENTENCE_SIZE,
        }
    }
}

impl FramerConfig {
    /// Create a validated configuration
    pub fn new(delimiter: impl Into<String>, max_sentence_size: usize) -> Result<Self> {
        let config = Self {
            delimiter: delimiter.into(),
            max_sentence_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration for `\r\n` terminated sentences, as NMEA 0183 specifies
    pub fn crlf() -> Self {
        Self {
            delimiter: "\r\n".to_string(),
            ..Self::default()
        }
    }

    /// Configuration for `\n` terminated lines
    pub fn newline() -> Self {
        Self {
            delimiter: "\n".to_string(),
            ..Self::default()
        }
    }

    /// Check the configuration
    ///
    /// A sentence can never be shorter than its delimiter, so a size limit
    /// below the delimiter length would drop every sentence.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(FramerError::ConfigError(
                "delimiter must not be empty".to_string(),
            ));
        }

        if self.max_sentence_size == 0 {
            return Err(FramerError::ConfigError(
                "max_sentence_size must be positive".to_string(),
            ));
        }

        if self.max_sentence_size < self.delimiter.len() {
            return Err(FramerError::ConfigError(format!(
                "max_sentence_size ({}) is smaller than the delimiter ({} bytes)",
                self.max_sentence_size,
                self.delimiter.len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FramerConfig::default();
        assert_eq!(config.delimiter, "\r");
        assert_eq!(config.max_sentence_size, 2048);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(FramerConfig::crlf().delimiter, "\r\n");
        assert_eq!(FramerConfig::newline().delimiter, "\n");
        assert_eq!(FramerConfig::crlf().max_sentence_size, 2048);
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let err = FramerConfig::new("", 16).unwrap_err();
        assert!(matches!(err, FramerError::ConfigError(_)));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(FramerConfig::new("\r", 0).is_err());
    }

    #[test]
    fn test_size_smaller_than_delimiter_rejected() {
        let err = FramerConfig::new("\r\n", 1).unwrap_err();
        assert!(err.to_string().contains("smaller than the delimiter"));
        assert!(FramerConfig::new("\r\n", 2).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_config() {
        let config: FramerConfig = serde_json::from_str(r#"{"max_sentence_size": 82}"#).unwrap();
        assert_eq!(config.delimiter, "\r");
        assert_eq!(config.max_sentence_size, 82);
    }
}
