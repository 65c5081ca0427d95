//! Timestamped sentence log files

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends delivered sentences to `<dir>/<yyyyMMdd_HHmmss>-<base_name>`
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    /// Start a log file named after the current local time
    pub fn new(dir: impl AsRef<Path>, base_name: &str) -> Self {
        Self {
            path: timestamped_path(dir.as_ref(), base_name, &Local::now()),
        }
    }

    /// Rotate to a new timestamped file; later appends go there
    pub fn new_file(&mut self, dir: impl AsRef<Path>, base_name: &str) -> &Path {
        self.path = timestamped_path(dir.as_ref(), base_name, &Local::now());
        log::info!("Logging sentences to {}", self.path.display());
        &self.path
    }

    /// Path of the current log file
    pub fn file_name(&self) -> &Path {
        &self.path
    }

    /// Open in append mode, write `text`, flush and close
    pub fn append(&self, text: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).with_context(|| {
                    format!("Failed to create log directory: {}", dir.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {}", self.path.display()))?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .with_context(|| format!("Failed to write log file: {}", self.path.display()))?;
        Ok(())
    }
}

fn timestamped_path<Tz>(dir: &Path, base_name: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dir.join(format!("{}-{}", now.format("%Y%m%d_%H%M%S"), base_name))
}
