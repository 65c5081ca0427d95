//! Sentence consumer wiring the framer to logging, decoding and output

use crate::gps::NmeaDecoder;
use crate::logging::FileLogger;
use crate::output::{OutputFormatter, SentenceRecord};
use anyhow::Result;
use reframe_core::{Overrun, Sentence, SentenceSink};

/// Totals reported when a run finishes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SinkSummary {
    /// Sentences handed to the formatter
    pub sentences: usize,
    /// Sentences that decoded to a position
    pub positions: usize,
    /// Oversized sentences dropped by the framer
    pub overruns: usize,
}

/// Receives framed sentences on behalf of the CLI
pub struct CliSink {
    formatter: Box<dyn OutputFormatter>,
    decoder: Option<NmeaDecoder>,
    logger: Option<FileLogger>,
    record_separator: String,
    summary: SinkSummary,
    error: Option<anyhow::Error>,
}

impl CliSink {
    /// Create a sink that only formats
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self {
            formatter,
            decoder: None,
            logger: None,
            record_separator: "\r".to_string(),
            summary: SinkSummary::default(),
            error: None,
        }
    }

    /// Decode NMEA positions before formatting
    pub fn with_decoder(mut self, decoder: NmeaDecoder) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Log every sentence, trimmed at both ends and followed by `record_separator`
    pub fn with_logger(mut self, logger: FileLogger, record_separator: impl Into<String>) -> Self {
        self.logger = Some(logger);
        self.record_separator = record_separator.into();
        self
    }

    /// Active log file, if any
    pub fn logger(&self) -> Option<&FileLogger> {
        self.logger.as_ref()
    }

    /// Totals so far
    pub fn summary(&self) -> SinkSummary {
        self.summary
    }

    /// First formatter error since the last call
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    /// Finish the formatter and return the totals
    pub fn finish(mut self) -> Result<SinkSummary> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.formatter.finish()?;
        Ok(self.summary)
    }
}

impl SentenceSink for CliSink {
    fn on_sentence(&mut self, sentence: Sentence) {
        let text = sentence.as_str();

        if let Some(logger) = &self.logger {
            let record = format!("{}{}", text.trim(), self.record_separator);
            if let Err(err) = logger.append(&record) {
                log::warn!("{:#}", err);
            }
        }

        let position = self.decoder.as_mut().and_then(|d| d.decode(text));
        if position.is_some() {
            self.summary.positions += 1;
        }

        // Stop writing once output has failed; the command reports the error
        if self.error.is_some() {
            return;
        }
        let record = SentenceRecord {
            index: self.summary.sentences,
            text,
            position: position.as_ref(),
        };
        match self.formatter.format_sentence(&record) {
            Ok(()) => self.summary.sentences += 1,
            Err(err) => self.error = Some(err),
        }
    }

    fn on_overrun(&mut self, overrun: &Overrun) {
        self.summary.overruns += 1;
        log::info!("Dropped oversized sentence: {}", overrun);
    }
}
