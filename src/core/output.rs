//! Output channels for line-oriented writers
//!
//! Each call to [`LogOutput::write_line`] performs a single `write_all` of the
//! complete line, newline included, while holding the channel's lock, so
//! concurrent records never interleave within a line.

use super::error::{LoggerError, Result};
use super::metrics::OutputMetrics;
use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// In-memory channel, mostly useful to capture output in tests
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }

    fn append(&self, bytes: &[u8]) {
        self.bytes.lock().extend_from_slice(bytes);
    }
}

#[derive(Clone)]
enum OutputTarget {
    Stdout,
    Stderr,
    Buffer(SharedBuffer),
    Writer {
        name: String,
        inner: Arc<Mutex<Box<dyn Write + Send>>>,
    },
}

/// Where a writer's lines go
///
/// Cloning a `LogOutput` yields another handle to the same channel and the
/// same metrics.
#[derive(Clone)]
pub struct LogOutput {
    target: OutputTarget,
    metrics: Arc<OutputMetrics>,
}

impl LogOutput {
    fn from_target(target: OutputTarget) -> Self {
        Self {
            target,
            metrics: Arc::new(OutputMetrics::new()),
        }
    }

    pub fn stdout() -> Self {
        Self::from_target(OutputTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::from_target(OutputTarget::Stderr)
    }

    pub fn buffer(buffer: &SharedBuffer) -> Self {
        Self::from_target(OutputTarget::Buffer(buffer.clone()))
    }

    /// Append to a file, creating it if needed
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log output",
                    format!("cannot open '{}' for append", path.display()),
                    e,
                )
            })?;

        Ok(Self::writer(path.display().to_string(), file))
    }

    /// Any byte sink, e.g. a socket or a pipe
    pub fn writer<W>(name: impl Into<String>, inner: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_target(OutputTarget::Writer {
            name: name.into(),
            inner: Arc::new(Mutex::new(Box::new(inner))),
        })
    }

    pub fn name(&self) -> &str {
        match &self.target {
            OutputTarget::Stdout => "stdout",
            OutputTarget::Stderr => "stderr",
            OutputTarget::Buffer(_) => "buffer",
            OutputTarget::Writer { name, .. } => name,
        }
    }

    pub fn metrics(&self) -> &OutputMetrics {
        &self.metrics
    }

    /// Write `line` followed by a newline in one operation
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');

        match self.write_bytes(&bytes) {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(LoggerError::io_operation(
                    "writing log line",
                    format!("output '{}' rejected the write", self.name()),
                    e,
                ))
            }
        }
    }

    fn write_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        match &self.target {
            OutputTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            OutputTarget::Stderr => {
                let mut out = std::io::stderr().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            OutputTarget::Buffer(buffer) => {
                buffer.append(bytes);
                Ok(())
            }
            OutputTarget::Writer { inner, .. } => {
                let mut inner = inner.lock();
                inner.write_all(bytes)?;
                inner.flush()
            }
        }
    }
}

impl Default for LogOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOutput")
            .field("target", &self.name())
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_buffer_output() {
        let buffer = SharedBuffer::new();
        let output = LogOutput::buffer(&buffer);

        output.write_line("first").unwrap();
        output.write_line("second").unwrap();

        assert_eq!(buffer.lines(), vec!["first", "second"]);
        assert_eq!(output.metrics().lines_written(), 2);
    }

    #[test]
    fn test_failed_write_is_counted() {
        let output = LogOutput::writer("pipe", ClosedPipe);
        let err = output.write_line("lost").unwrap_err();

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert_eq!(output.metrics().write_failures(), 1);
        assert_eq!(output.metrics().lines_written(), 0);
    }

    #[test]
    fn test_file_output_appends() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.log");

        LogOutput::file(&path)?.write_line("one")?;
        LogOutput::file(&path)?.write_line("two")?;

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content, "one\ntwo\n");
        Ok(())
    }

    #[test]
    fn test_file_output_bad_path() {
        let err = LogOutput::file("/nonexistent-dir/for/sure/app.log").unwrap_err();
        assert!(err.to_string().contains("opening log output"));
    }

    #[test]
    fn test_clones_share_metrics() {
        let buffer = SharedBuffer::new();
        let output = LogOutput::buffer(&buffer);
        let clone = output.clone();

        clone.write_line("x").unwrap();
        assert_eq!(output.metrics().lines_written(), 1);
    }
}
