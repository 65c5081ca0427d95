//! Delimiter-based reframing of continuous byte streams
//!
//! A serial port or a socket delivers bytes in chunks that have nothing to do
//! with the sentences they carry. [`StreamFramer`] accumulates those chunks,
//! cuts them at a configured delimiter and hands every complete sentence to a
//! [`SentenceSink`], in stream order.
//!
//! Sentences that outgrow the configured limit before their delimiter arrives
//! are dropped, and framing picks up again at the next delimiter. The drop is
//! reported to the sink as an [`Overrun`] value, never as an error.
//!
//! # Example
//!
//! ```rust
//! use reframe_core::{FramerConfig, Sentence, StreamFramer};
//!
//! let mut framer = StreamFramer::new(Vec::<Sentence>::new());
//!
//! framer.feed(b"$GPGGA,1\r$GPG").unwrap();
//! framer.feed(b"GA,2\r").unwrap();
//!
//! let sentences = framer.into_sink();
//! assert_eq!(sentences, vec!["$GPGGA,1\r", "$GPGGA,2\r"]);
//!
//! // Oversized sentences are dropped without losing sync
//! let config = FramerConfig::new("\r", 5).unwrap();
//! let mut framer = StreamFramer::with_config(config, Vec::<Sentence>::new()).unwrap();
//! let summary = framer.feed(b"abcdef\rok\r").unwrap();
//! assert_eq!(summary.overruns, 1);
//! assert_eq!(framer.sink()[0], "ok\r");
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod framer;
pub mod sink;
pub mod utf8;

// Re-export key types
pub use buffer::{Overrun, Sentence, SentenceBuffer};
pub use config::{FramerConfig, DEFAULT_DELIMITER, DEFAULT_MAX_SENTENCE_SIZE};
pub use error::{FramerError, Result};
pub use framer::{FeedSummary, FramerStats, StreamFramer};
pub use sink::{from_fn, FnSink, SentenceSink};
pub use utf8::Utf8Carry;
