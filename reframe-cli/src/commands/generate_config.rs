//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the delimiter and size limit to match your device");
        println!("2. Validate your configuration:");
        println!("   reframe validate -c {}", self.output.display());
        println!("3. Use it for framing:");
        println!("   reframe frame -i capture.bin -c {}", self.output.display());

        Ok(())
    }
}

const TEMPLATE: &str = r#"# reframe configuration
#
# Command-line flags override every value in this file.

[framing]
# Marks the end of a sentence; may be several characters, e.g. "\r\n"
delimiter = "\r"
# Largest sentence in bytes, delimiter included. Longer sentences are dropped
# and framing resumes after the next delimiter.
max_sentence_size = 2048

[replay]
# Delay between replayed lines in milliseconds
cadence_ms = 30
# Appended to every replayed line in place of its own line ending
line_delimiter = "\r"

[logging]
# Write every sentence to <directory>/<yyyyMMdd_HHmmss>-<base_name>
enabled = false
directory = "logs"
base_name = "sentences.log"
# Written after each logged sentence
record_separator = "\r"

[output]
# "text" or "json"
default_format = "text"
# Decode positions from GGA, RMC and GLL sentences
decode_nmea = false
pretty_json = true
"#;
