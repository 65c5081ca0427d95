//! Stream to sentence reframing
//!
//! The framer is always assembling exactly one sentence. Each delimiter found
//! in the input closes the live [`SentenceBuffer`], hands the result to the
//! sink and starts a fresh buffer. Text after the last delimiter stays in the
//! live buffer until the next `feed`.

use crate::buffer::{Overrun, Sentence, SentenceBuffer};
use crate::config::FramerConfig;
use crate::error::Result;
use crate::sink::SentenceSink;
use crate::utf8::Utf8Carry;

/// Counters over the life of a framer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FramerStats {
    /// Bytes accepted by `feed`
    pub bytes_fed: u64,
    /// Sentences handed to the sink
    pub sentences_delivered: u64,
    /// Bytes of the delivered sentences, delimiters included
    pub bytes_delivered: u64,
    /// Sentences dropped for exceeding the size limit
    pub overruns: u64,
    /// Bytes lost to overruns and to rejected partial code points
    pub bytes_dropped: u64,
}

/// Outcome of a single `feed` call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    /// Sentences delivered during the call
    pub sentences: usize,
    /// Sentences dropped during the call
    pub overruns: usize,
}

/// Delimiter-scanning reframer for a byte stream
///
/// `feed` takes `&mut self`: one owner drives the framer, and sentences reach
/// the sink in the order their delimiters appear in the stream, however the
/// bytes were chunked.
#[derive(Debug)]
pub struct StreamFramer<S> {
    config: FramerConfig,
    current: SentenceBuffer,
    carry: Utf8Carry,
    sink: S,
    stats: FramerStats,
}

impl<S: SentenceSink> StreamFramer<S> {
    /// Create a framer with the default `\r` delimiter and 2048 byte limit
    pub fn new(sink: S) -> Self {
        Self::build(FramerConfig::default(), sink)
    }

    /// Create a framer with a custom configuration
    pub fn with_config(config: FramerConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, sink))
    }

    fn build(config: FramerConfig, sink: S) -> Self {
        let current = SentenceBuffer::with_capacity_unchecked(config.max_sentence_size);
        Self {
            config,
            current,
            carry: Utf8Carry::new(),
            sink,
            stats: FramerStats::default(),
        }
    }

    /// Feed the next chunk of the stream
    ///
    /// Every sentence completed by this chunk is delivered to the sink before
    /// the call returns. Malformed UTF-8 rejects the whole chunk and leaves
    /// the sentence being assembled untouched.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<FeedSummary> {
        let carried = self.carry.pending_len();
        let decoded = match self.carry.decode(bytes) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Rejecting {} byte chunk: {}", bytes.len(), err);
                self.stats.bytes_dropped += carried as u64;
                return Err(err);
            }
        };
        self.stats.bytes_fed += bytes.len() as u64;

        let mut summary = FeedSummary::default();
        let mut incoming: &str = &decoded;

        while let Some(end) = self.next_boundary(incoming) {
            let (fragment, rest) = incoming.split_at(end);
            self.complete(fragment, &mut summary);
            incoming = rest;
        }

        self.current.append(incoming);

        Ok(summary)
    }

    /// End of the first delimiter in `incoming`, as an offset into it
    ///
    /// A delimiter may have started at the tail of the live buffer in an
    /// earlier chunk; such a match always ends first.
    fn next_boundary(&self, incoming: &str) -> Option<usize> {
        let delimiter = self.config.delimiter.as_bytes();
        let tail = self.current.text().as_bytes();

        let longest = (delimiter.len() - 1).min(tail.len());
        for split in (1..=longest).rev() {
            let (head, rest) = delimiter.split_at(split);
            if tail.ends_with(head) && incoming.as_bytes().starts_with(rest) {
                return Some(rest.len());
            }
        }

        incoming
            .find(self.config.delimiter.as_str())
            .map(|position| position + delimiter.len())
    }

    fn complete(&mut self, fragment: &str, summary: &mut FeedSummary) {
        let fresh = SentenceBuffer::with_capacity_unchecked(self.config.max_sentence_size);
        let buffer = std::mem::replace(&mut self.current, fresh);

        match buffer.finalize(fragment) {
            Ok(sentence) => self.deliver(sentence, summary),
            Err(overrun) => self.drop_overrun(overrun, summary),
        }
    }

    fn deliver(&mut self, sentence: Sentence, summary: &mut FeedSummary) {
        log::trace!("Framed sentence of {} bytes", sentence.len());
        self.stats.sentences_delivered += 1;
        self.stats.bytes_delivered += sentence.len() as u64;
        summary.sentences += 1;
        self.sink.on_sentence(sentence);
    }

    fn drop_overrun(&mut self, overrun: Overrun, summary: &mut FeedSummary) {
        log::debug!("Dropping sentence: {}", overrun);
        self.stats.overruns += 1;
        self.stats.bytes_dropped += overrun.dropped as u64;
        summary.overruns += 1;
        self.sink.on_overrun(&overrun);
    }
}

impl<S> StreamFramer<S> {
    /// Text of the sentence being assembled
    pub fn pending(&self) -> &str {
        self.current.text()
    }

    /// The live sentence buffer
    pub fn current(&self) -> &SentenceBuffer {
        &self.current
    }

    /// Bytes fed but neither delivered nor reported dropped yet
    ///
    /// Includes text already discarded from an overrunning sentence and any
    /// partial code point waiting for its next byte.
    pub fn pending_bytes(&self) -> usize {
        self.current.received() + self.carry.pending_len()
    }

    /// Framer configuration
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Lifetime counters
    pub fn stats(&self) -> FramerStats {
        self.stats
    }

    /// The registered sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The registered sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the framer, returning its sink
    ///
    /// A sentence still being assembled is discarded.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
