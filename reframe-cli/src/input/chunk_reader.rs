//! Raw byte input in fixed-size chunks

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

/// Chunk size used when reading raw input
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Open a file for reading, or stdin when `path` is `-`
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    let file =
        File::open(path).with_context(|| format!("Failed to open input: {}", path.display()))?;
    Ok(Box::new(file))
}

/// Hands a reader's bytes to a callback as they arrive
pub struct ChunkReader<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: Read> ChunkReader<R> {
    /// Read in chunks of at most `chunk_size` bytes
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; chunk_size.max(1)],
        }
    }

    /// Feed every chunk to `on_chunk` until end of input; returns the byte count
    pub fn for_each_chunk<F>(&mut self, mut on_chunk: F) -> Result<u64>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        let mut total = 0u64;
        loop {
            let n = match self.reader.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Failed to read input"),
            };
            total += n as u64;
            on_chunk(&self.buffer[..n])?;
        }
        Ok(total)
    }
}
