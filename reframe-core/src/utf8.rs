//! UTF-8 decoding across chunk boundaries
//!
//! A code point can be 1 to 4 bytes long, and a transport is free to split
//! it between two reads. The bytes of an incomplete trailing sequence are
//! held back and prefixed to the next chunk.

use std::borrow::Cow;
use std::str;

use crate::error::{FramerError, Result};

/// Longest possible incomplete sequence: three bytes of a four byte code point
const MAX_CARRY: usize = 3;

/// Stateful UTF-8 decoder for a chunked byte stream
#[derive(Debug, Default, Clone)]
pub struct Utf8Carry {
    pending: [u8; MAX_CARRY],
    len: usize,
}

impl Utf8Carry {
    /// Create a decoder with nothing carried
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, completing any sequence carried from the previous one
    ///
    /// Returns the text that can be decoded so far. Malformed input is an
    /// error; the carried bytes are dropped with it so the next chunk starts
    /// clean.
    pub fn decode<'a>(&mut self, chunk: &'a [u8]) -> Result<Cow<'a, str>> {
        if self.len == 0 {
            let (text, rest) = match split_complete(chunk) {
                Ok(split) => split,
                Err(position) => return Err(FramerError::InvalidUtf8 { position }),
            };
            self.hold(rest);
            return Ok(Cow::Borrowed(text));
        }

        let carried = self.len;
        let mut joined = Vec::with_capacity(carried + chunk.len());
        joined.extend_from_slice(&self.pending[..carried]);
        joined.extend_from_slice(chunk);

        match split_complete(&joined) {
            Ok((text, rest)) => {
                let text = text.to_owned();
                let rest = rest.to_vec();
                self.hold(&rest);
                Ok(Cow::Owned(text))
            }
            Err(position) => {
                self.len = 0;
                Err(FramerError::InvalidUtf8 {
                    position: position.saturating_sub(carried),
                })
            }
        }
    }

    /// Number of bytes waiting for the rest of their code point
    pub fn pending_len(&self) -> usize {
        self.len
    }

    fn hold(&mut self, rest: &[u8]) {
        debug_assert!(rest.len() <= MAX_CARRY);
        self.pending[..rest.len()].copy_from_slice(rest);
        self.len = rest.len();
    }
}

/// Split `bytes` into the longest valid prefix and an incomplete tail.
///
/// Returns the position of the first invalid byte if the input is malformed
/// anywhere other than at its very end.
fn split_complete(bytes: &[u8]) -> std::result::Result<(&str, &[u8]), usize> {
    match str::from_utf8(bytes) {
        Ok(text) => Ok((text, &bytes[bytes.len()..])),
        Err(err) if err.error_len().is_none() => {
            let (valid, rest) = bytes.split_at(err.valid_up_to());
            // valid_up_to marks a boundary, the prefix always decodes
            let text = str::from_utf8(valid).map_err(|e| e.valid_up_to())?;
            Ok((text, rest))
        }
        Err(err) => Err(err.valid_up_to()),
    }
}
