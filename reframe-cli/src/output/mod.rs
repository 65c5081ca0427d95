//! Output formatting module

use crate::gps::GpsPosition;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One delivered sentence as seen by a formatter
#[derive(Debug, Clone, Copy)]
pub struct SentenceRecord<'a> {
    /// Zero-based delivery index across the whole run
    pub index: usize,
    /// Sentence text including its delimiter
    pub text: &'a str,
    /// Decoded position, when NMEA decoding is enabled and succeeded
    pub position: Option<&'a GpsPosition>,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single sentence
    fn format_sentence(&mut self, record: &SentenceRecord<'_>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text with one sentence per line
    #[default]
    Text,
    /// JSON array of sentences with metadata
    Json,
}

impl OutputFormat {
    /// Build the formatter for this format on top of `writer`
    pub fn formatter<W>(self, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + Sync + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
        }
    }
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
