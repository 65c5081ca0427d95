//! Replay command implementation

use super::{feed_chunk, finish_framer, StreamOptions};
use crate::config::unescape;
use crate::input::{resolve_patterns, FileReplayer};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::time::Duration;

/// Arguments for the replay command
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Capture files or patterns (supports glob), replayed in order
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Delay between lines in milliseconds [default: 30]
    #[arg(long, value_name = "MS")]
    pub cadence_ms: Option<u64>,

    /// Appended to each replayed line, may be empty [default: \r]
    #[arg(long, value_name = "DELIM")]
    pub line_delimiter: Option<String>,

    #[command(flatten)]
    pub stream: StreamOptions,
}

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self) -> Result<()> {
        self.stream.init_logging();

        log::info!("Starting replay");
        log::debug!("Arguments: {:?}", self);

        let mut config = self.stream.resolve_config()?;
        if let Some(cadence) = self.cadence_ms {
            config.replay.cadence_ms = cadence;
        }
        if let Some(delimiter) = &self.line_delimiter {
            config.replay.line_delimiter = unescape(delimiter)?;
        }

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} files to replay", files.len());

        let mut framer = self.stream.build_framer(&config)?;
        let mut progress = ProgressReporter::new(self.stream.quiet);
        progress.init_files(files.len() as u64);

        for file in &files {
            let name = file.display().to_string();
            progress.file_started(&name);

            let replayer = FileReplayer::new(file)
                .cadence(Duration::from_millis(config.replay.cadence_ms))
                .line_delimiter(config.replay.line_delimiter.as_str());
            let lines = replayer
                .run(|bytes| feed_chunk(&mut framer, bytes))
                .with_context(|| format!("Failed to replay {}", name))?;

            progress.file_completed(&name, lines);
        }

        progress.finish();
        finish_framer(framer)?;
        Ok(())
    }
}
