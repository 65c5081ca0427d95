//! Accumulation of a single in-progress sentence

use std::fmt;
use std::ops::Deref;

use crate::error::{FramerError, Result};

/// Text of the sentence currently being assembled
///
/// A buffer lives for exactly one sentence. [`SentenceBuffer::finalize`]
/// consumes it, so overrun state cannot leak into the next sentence.
#[derive(Debug)]
pub struct SentenceBuffer {
    content: String,
    max_size: usize,
    overrun: bool,
    /// Bytes handed to this buffer so far, kept or not
    received: usize,
}

impl SentenceBuffer {
    /// Create an empty buffer holding at most `max_size` bytes
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(FramerError::ConfigError(
                "sentence buffer size must be positive".to_string(),
            ));
        }

        Ok(Self::with_capacity_unchecked(max_size))
    }

    /// Used by the framer, whose configuration was validated already
    pub(crate) fn with_capacity_unchecked(max_size: usize) -> Self {
        debug_assert!(max_size > 0);
        Self {
            content: String::new(),
            max_size,
            overrun: false,
            received: 0,
        }
    }

    /// Append text to the sentence
    ///
    /// When the result would exceed the size limit, the content gathered so
    /// far is discarded and the overrun flag is raised. The new text is kept,
    /// cut down to its trailing `max_size` bytes if it is too long by itself.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.received += text.len();

        if self.content.len() + text.len() <= self.max_size {
            self.content.push_str(text);
            return;
        }

        self.overrun = true;
        self.content.clear();
        self.content.push_str(tail_within(text, self.max_size));
    }

    /// Close the sentence with its terminating fragment
    ///
    /// The fragment is the text up to and including the delimiter. Returns
    /// the complete sentence, or an [`Overrun`] if the size limit was exceeded
    /// at any point, the fragment included.
    pub fn finalize(mut self, text: &str) -> std::result::Result<Sentence, Overrun> {
        if !self.overrun {
            self.append(text);
        } else {
            self.received += text.len();
        }

        if self.overrun {
            return Err(Overrun {
                dropped: self.received,
                max_size: self.max_size,
            });
        }

        Ok(Sentence {
            text: self.content,
        })
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.content
    }

    /// Length of the accumulated text in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if no text has been kept
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Size limit of this buffer
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether the size limit has been exceeded since the sentence started
    pub fn is_overrun(&self) -> bool {
        self.overrun
    }

    /// Bytes handed to this buffer, including any discarded by truncation
    pub(crate) fn received(&self) -> usize {
        self.received
    }
}

/// Longest suffix of `text` that fits in `limit` bytes and starts on a char
/// boundary
fn tail_within(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut start = text.len() - limit;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

/// A complete sentence, delimiter included
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    text: String,
}

impl Sentence {
    /// Sentence text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take ownership of the text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl Deref for Sentence {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for Sentence {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Sentence {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl From<Sentence> for String {
    fn from(sentence: Sentence) -> Self {
        sentence.text
    }
}

/// A sentence dropped because it outgrew its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overrun {
    /// Bytes of the sentence that were lost, terminating fragment included
    pub dropped: usize,
    /// Size limit that was exceeded
    pub max_size: usize,
}

impl fmt::Display for Overrun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sentence overrun: {} bytes dropped (limit {})",
            self.dropped, self.max_size
        )
    }
}
