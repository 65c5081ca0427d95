//! Reframe CLI library
//!
//! This library provides the command-line interface for the reframe stream
//! framer: raw and replayed input, sentence logging, NMEA position decoding
//! and text or JSON output.

pub mod commands;
pub mod config;
pub mod error;
pub mod gps;
pub mod input;
pub mod logging;
pub mod output;
pub mod progress;
pub mod sink;

pub use error::{CliError, CliResult};
