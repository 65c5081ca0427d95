//! Framer error types
//!
//! Only faults that the caller must act on are errors. A sentence dropped for
//! exceeding its size limit is reported as an [`Overrun`](crate::Overrun)
//! value instead.

use thiserror::Error;

/// Errors surfaced by the framer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramerError {
    /// The chunk handed to `feed` is not valid UTF-8
    #[error("invalid UTF-8 at byte {position} of chunk")]
    InvalidUtf8 {
        /// Byte offset of the first invalid byte, relative to the fed chunk
        position: usize,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

/// Result type for framer operations
pub type Result<T> = std::result::Result<T, FramerError>;
