//! Line-by-line file replay at a fixed cadence
//!
//! Plays a recorded capture back as if it were arriving from a device: each
//! line has its own line ending replaced by the configured delimiter and is
//! handed over as raw bytes, followed by a pause.

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Delay between lines unless configured otherwise
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(30);

/// Cooperative stop signal shared with a running replay
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the replay to stop after the line in flight
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Replays one file line by line
#[derive(Debug, Clone)]
pub struct FileReplayer {
    path: PathBuf,
    cadence: Duration,
    line_delimiter: Vec<u8>,
    stop: StopHandle,
}

impl FileReplayer {
    /// Replay `path` with a `\r` line delimiter and the default cadence
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cadence: DEFAULT_CADENCE,
            line_delimiter: b"\r".to_vec(),
            stop: StopHandle::default(),
        }
    }

    /// Set the delay between lines; zero disables pacing
    pub fn cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// Set the bytes appended to every line; may be empty
    pub fn line_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.line_delimiter = delimiter.into().into_bytes();
        self
    }

    /// Handle that stops this replay from another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Replay on the current thread; returns the number of lines sent
    pub fn run<F>(&self, mut on_data: F) -> Result<usize>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        if !self.path.is_file() {
            return Err(CliError::FileNotFound(self.path.display().to_string()).into());
        }
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open replay file: {}", self.path.display()))?;
        let mut reader = BufReader::new(file);

        let mut line = Vec::new();
        let mut sent = 0;
        while !self.stop.is_stopped() {
            line.clear();
            let more = read_line(&mut reader, &mut line)
                .with_context(|| format!("Failed to read {}", self.path.display()))?;
            if !more {
                break;
            }

            line.extend_from_slice(&self.line_delimiter);
            on_data(&line)?;
            sent += 1;

            if !self.cadence.is_zero() {
                thread::sleep(self.cadence);
            }
        }

        log::debug!("Replayed {} lines from {}", sent, self.path.display());
        Ok(sent)
    }

    /// Replay on a worker thread
    pub fn spawn<F>(self, on_data: F) -> JoinHandle<Result<usize>>
    where
        F: FnMut(&[u8]) -> Result<()> + Send + 'static,
    {
        thread::spawn(move || self.run(on_data))
    }
}

/// Read one line into `line` without its ending
///
/// A line ends at `\r`, `\n` or `\r\n`. Returns `false` once the input is
/// exhausted and nothing was read.
fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    let mut read_any = false;
    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            return Ok(read_any);
        }
        read_any = true;

        match buf.iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(end) => {
                let ending = buf[end];
                line.extend_from_slice(&buf[..end]);
                reader.consume(end + 1);
                if ending == b'\r' {
                    skip_newline(reader)?;
                }
                return Ok(true);
            }
            None => {
                let n = buf.len();
                line.extend_from_slice(buf);
                reader.consume(n);
            }
        }
    }
}

/// Consume a `\n` directly following a `\r`, even across buffer refills
fn skip_newline<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => {
                if buf.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn capture(dir: &TempDir, content: &[u8]) -> PathBuf {
        let path = dir.path().join("capture.nmea");
        fs::write(&path, content).unwrap();
        path
    }

    fn collect(replayer: &FileReplayer) -> Vec<Vec<u8>> {
        let mut packets = Vec::new();
        replayer
            .run(|bytes| {
                packets.push(bytes.to_vec());
                Ok(())
            })
            .unwrap();
        packets
    }

    #[test]
    fn test_line_endings_replaced_by_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"$GPGGA,1\n$GPGGA,2\r\n$GPGGA,3");

        let replayer = FileReplayer::new(path).cadence(Duration::ZERO);
        assert_eq!(
            collect(&replayer),
            vec![
                b"$GPGGA,1\r".to_vec(),
                b"$GPGGA,2\r".to_vec(),
                b"$GPGGA,3\r".to_vec()
            ]
        );
    }

    #[test]
    fn test_cr_only_capture_split_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"$GPGGA,1\r$GPGGA,2\r");

        let replayer = FileReplayer::new(path).cadence(Duration::ZERO);
        assert_eq!(
            collect(&replayer),
            vec![b"$GPGGA,1\r".to_vec(), b"$GPGGA,2\r".to_vec()]
        );
    }

    #[test]
    fn test_mixed_line_endings() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"a\rb\r\nc\n\nd");

        let replayer = FileReplayer::new(path)
            .cadence(Duration::ZERO)
            .line_delimiter("|");
        assert_eq!(
            collect(&replayer),
            vec![
                b"a|".to_vec(),
                b"b|".to_vec(),
                b"c|".to_vec(),
                b"|".to_vec(),
                b"d|".to_vec()
            ]
        );
    }

    #[test]
    fn test_crlf_split_across_buffer_refill() {
        let mut reader = BufReader::with_capacity(3, &b"ab\r\ncd"[..]);
        let mut line = Vec::new();

        assert!(read_line(&mut reader, &mut line).unwrap());
        assert_eq!(line, b"ab");

        line.clear();
        assert!(read_line(&mut reader, &mut line).unwrap());
        assert_eq!(line, b"cd");

        line.clear();
        assert!(!read_line(&mut reader, &mut line).unwrap());
    }

    #[test]
    fn test_empty_and_custom_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"a\nb\n");

        let bare = FileReplayer::new(&path)
            .cadence(Duration::ZERO)
            .line_delimiter("");
        assert_eq!(collect(&bare), vec![b"a".to_vec(), b"b".to_vec()]);

        let crlf = FileReplayer::new(&path)
            .cadence(Duration::ZERO)
            .line_delimiter("\r\n");
        assert_eq!(collect(&crlf), vec![b"a\r\n".to_vec(), b"b\r\n".to_vec()]);
    }

    #[test]
    fn test_non_utf8_lines_passed_through() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"\xff\xfe\n");

        let replayer = FileReplayer::new(path).cadence(Duration::ZERO);
        assert_eq!(collect(&replayer), vec![b"\xff\xfe\r".to_vec()]);
    }

    #[test]
    fn test_stop_before_run_sends_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"a\nb\n");

        let replayer = FileReplayer::new(path).cadence(Duration::ZERO);
        replayer.stop_handle().stop();
        assert!(collect(&replayer).is_empty());
    }

    #[test]
    fn test_stop_from_callback() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"a\nb\nc\nd\n");

        let replayer = FileReplayer::new(path).cadence(Duration::ZERO);
        let stop = replayer.stop_handle();
        let mut seen = 0;
        let sent = replayer
            .run(|_| {
                seen += 1;
                if seen == 2 {
                    stop.stop();
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(sent, 2);
    }

    #[test]
    fn test_callback_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"a\nb\n");

        let replayer = FileReplayer::new(path).cadence(Duration::ZERO);
        let err = replayer.run(|_| anyhow::bail!("framer rejected input"));
        assert_eq!(err.unwrap_err().to_string(), "framer rejected input");
    }

    #[test]
    fn test_missing_file() {
        let replayer = FileReplayer::new("/nonexistent/capture.nmea");
        let err = replayer.run(|_| Ok(())).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_spawn_returns_line_count() {
        let temp_dir = TempDir::new().unwrap();
        let path = capture(&temp_dir, b"a\nb\nc\n");
        let (tx, rx) = mpsc::channel();

        let handle = FileReplayer::new(path)
            .cadence(Duration::from_millis(1))
            .spawn(move |bytes| {
                tx.send(bytes.to_vec())?;
                Ok(())
            });

        assert_eq!(handle.join().unwrap().unwrap(), 3);
        let received: Vec<Vec<u8>> = rx.iter().collect();
        assert_eq!(received.len(), 3);
        assert_eq!(received[2], b"c\r".to_vec());
    }
}
