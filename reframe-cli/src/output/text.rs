//! Plain text output formatter

use super::{OutputFormatter, SentenceRecord};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one sentence per line
///
/// Whitespace is trimmed from both ends along with the delimiter.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, record: &SentenceRecord<'_>) -> Result<()> {
        let text = record.text.trim();
        match record.position {
            Some(pos) => match pos.altitude {
                Some(alt) => writeln!(
                    self.writer,
                    "{}\t{:.6},{:.6},{:.1}",
                    text, pos.latitude, pos.longitude, alt
                )?,
                None => writeln!(
                    self.writer,
                    "{}\t{:.6},{:.6}",
                    text, pos.latitude, pos.longitude
                )?,
            },
            None => writeln!(self.writer, "{}", text)?,
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
