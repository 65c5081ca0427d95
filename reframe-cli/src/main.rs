//! Command-line entry point for reframe

use clap::Parser;
use reframe_cli::commands::Commands;

/// Reframe serial and NMEA byte streams into delimited sentences
#[derive(Debug, Parser)]
#[command(name = "reframe", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
