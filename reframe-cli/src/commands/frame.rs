//! Frame command implementation

use super::{feed_chunk, finish_framer, StreamOptions};
use crate::input::{open_input, ChunkReader, DEFAULT_CHUNK_SIZE};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the frame command
#[derive(Debug, Args)]
pub struct FrameArgs {
    /// Input file, or - for stdin
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub input: PathBuf,

    /// Read size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub stream: StreamOptions,
}

impl FrameArgs {
    /// Execute the frame command
    pub fn execute(&self) -> Result<()> {
        self.stream.init_logging();

        log::info!("Framing {}", self.input.display());
        log::debug!("Arguments: {:?}", self);

        let config = self.stream.resolve_config()?;
        let mut framer = self.stream.build_framer(&config)?;

        let reader = open_input(&self.input)?;
        ChunkReader::new(reader, self.chunk_size)
            .for_each_chunk(|chunk| feed_chunk(&mut framer, chunk))
            .with_context(|| format!("Failed to frame {}", self.input.display()))?;

        finish_framer(framer)?;
        Ok(())
    }
}
