//! CLI command implementations

use crate::config::{unescape, CliConfig};
use crate::error::CliError;
use crate::gps::NmeaDecoder;
use crate::logging::FileLogger;
use crate::output::{OutputFormat, OutputFormatter};
use crate::sink::{CliSink, SinkSummary};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use reframe_core::StreamFramer;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

pub mod frame;
pub mod generate_config;
pub mod replay;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Frame a raw byte stream from a file or stdin
    Frame(frame::FrameArgs),

    /// Replay recorded captures line by line at a fixed cadence
    Replay(replay::ReplayArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check that a configuration file is valid
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Frame(args) => args.execute(),
            Commands::Replay(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Options shared by the commands that drive a framer
#[derive(Debug, Default, Args)]
pub struct StreamOptions {
    /// Sentence delimiter; understands \r, \n, \t and \\ [default: \r]
    #[arg(short, long, value_name = "DELIM")]
    pub delimiter: Option<String>,

    /// Largest sentence in bytes, delimiter included [default: 2048]
    #[arg(short, long, value_name = "BYTES")]
    pub max_sentence_size: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Decode positions from NMEA fix sentences
    #[arg(long)]
    pub decode_nmea: bool,

    /// Log every sentence to a timestamped file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Base name of the sentence log file
    #[arg(long, value_name = "NAME")]
    pub log_name: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl StreamOptions {
    /// Load the configuration file, if any, and apply flag overrides
    pub fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(delimiter) = &self.delimiter {
            config.framing.delimiter = unescape(delimiter)?;
        }
        if let Some(size) = self.max_sentence_size {
            config.framing.max_sentence_size = size;
        }
        if let Some(format) = self.format {
            config.output.default_format = format;
        }
        if self.decode_nmea {
            config.output.decode_nmea = true;
        }
        if let Some(dir) = &self.log_dir {
            config.logging.enabled = true;
            config.logging.directory = dir.clone();
        }
        if let Some(name) = &self.log_name {
            config.logging.enabled = true;
            config.logging.base_name = name.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a framer whose sink writes to the configured output
    pub fn build_framer(&self, config: &CliConfig) -> Result<StreamFramer<CliSink>> {
        let formatter = self.formatter(config)?;
        let mut sink = CliSink::new(formatter);

        if config.output.decode_nmea {
            sink = sink.with_decoder(NmeaDecoder::new());
        }
        if config.logging.enabled {
            let logger = FileLogger::new(&config.logging.directory, &config.logging.base_name);
            log::info!("Logging sentences to {}", logger.file_name().display());
            sink = sink.with_logger(logger, config.logging.record_separator.clone());
        }

        log::debug!(
            "Framing with delimiter {:?}, limit {} bytes",
            config.framing.delimiter,
            config.framing.max_sentence_size
        );
        let framer =
            StreamFramer::with_config(config.framing.clone(), sink).map_err(CliError::from)?;
        Ok(framer)
    }

    fn formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let format = config.output.default_format;
        let pretty = config.output.pretty_json;
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output: {}", path.display()))?;
                Ok(format.formatter(BufWriter::new(file), pretty))
            }
            None => Ok(format.formatter(io::stdout(), pretty)),
        }
    }

    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        init_logging(self.verbose, self.quiet);
    }
}

/// Initialize `env_logger` from the `-v` count unless quiet
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A logger may already be installed when commands run in-process
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

/// Feed one chunk and surface any output error the sink stored
pub fn feed_chunk(framer: &mut StreamFramer<CliSink>, bytes: &[u8]) -> Result<()> {
    framer.feed(bytes).map_err(CliError::from)?;
    if let Some(err) = framer.sink_mut().take_error() {
        return Err(err.context("Failed to write output"));
    }
    Ok(())
}

/// Close out a run: report the unterminated tail, finish output, log totals
pub fn finish_framer(framer: StreamFramer<CliSink>) -> Result<SinkSummary> {
    let pending = framer.pending_bytes();
    if pending > 0 {
        log::warn!(
            "Discarding {} bytes of an unterminated sentence at end of input",
            pending
        );
    }

    let stats = framer.stats();
    let summary = framer
        .into_sink()
        .finish()
        .context("Failed to write output")?;

    log::info!(
        "Framed {} sentences from {} bytes ({} overruns, {} bytes dropped, {} positions)",
        stats.sentences_delivered,
        stats.bytes_fed,
        stats.overruns,
        stats.bytes_dropped,
        summary.positions
    );
    Ok(summary)
}
