//! Predicate-gated writer
//!
//! ```
//! use structured_logger::prelude::*;
//! use structured_logger::writers::mute;
//! use std::sync::Arc;
//!
//! let console: SharedWriter = Arc::new(ConsoleWriter::new(Severity::Debug));
//! let writer = mute::when(|record| record.message.starts_with("GET /health"))
//!     .otherwise(console);
//!
//! writer.info("GET /health 200");
//! ```

use crate::core::{LogRecord, LogWriter, LoggerError, Result, SharedWriter, WriterConfig};
use std::sync::Arc;

/// Returns `true` for records that should be dropped
pub type MutePredicate = Arc<dyn Fn(&LogRecord<'_>) -> bool + Send + Sync>;

/// Drops records matching a predicate and forwards the rest unchanged
///
/// Has no severity gate of its own; muting can depend on the message,
/// the context or the attached error.
pub struct MuteWriter {
    config: WriterConfig,
    predicate: MutePredicate,
    delegate: SharedWriter,
}

impl MuteWriter {
    pub fn new<P>(predicate: P, delegate: SharedWriter) -> Self
    where
        P: Fn(&LogRecord<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            config: WriterConfig::new(crate::core::Severity::Default),
            predicate: Arc::new(predicate),
            delegate,
        }
    }

    pub fn builder() -> MuteWriterBuilder {
        MuteWriterBuilder::default()
    }

    pub fn delegate(&self) -> &SharedWriter {
        &self.delegate
    }
}

impl LogWriter for MuteWriter {
    fn config(&self) -> &WriterConfig {
        &self.config
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<()> {
        if (self.predicate)(record) {
            return Ok(());
        }

        self.delegate.log(
            record.severity,
            record.message,
            record.context.clone(),
            record.error,
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "mute"
    }
}

/// Step-by-step construction where either part may be missing
#[derive(Default)]
pub struct MuteWriterBuilder {
    predicate: Option<MutePredicate>,
    delegate: Option<SharedWriter>,
}

impl MuteWriterBuilder {
    #[must_use = "builder methods return a new value"]
    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&LogRecord<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn delegate(mut self, delegate: SharedWriter) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the predicate or the delegate is missing.
    pub fn build(self) -> Result<MuteWriter> {
        let predicate = self
            .predicate
            .ok_or_else(|| LoggerError::config("MuteWriter", "a mute predicate is required"))?;
        let delegate = self
            .delegate
            .ok_or_else(|| LoggerError::config("MuteWriter", "a delegate writer is required"))?;

        Ok(MuteWriter {
            config: WriterConfig::new(crate::core::Severity::Default),
            predicate,
            delegate,
        })
    }
}

/// First half of `mute::when(..).otherwise(..)`
pub struct MuteWhen {
    predicate: MutePredicate,
}

pub fn when<P>(predicate: P) -> MuteWhen
where
    P: Fn(&LogRecord<'_>) -> bool + Send + Sync + 'static,
{
    MuteWhen {
        predicate: Arc::new(predicate),
    }
}

impl MuteWhen {
    pub fn otherwise(self, delegate: SharedWriter) -> MuteWriter {
        MuteWriter {
            config: WriterConfig::new(crate::core::Severity::Default),
            predicate: self.predicate,
            delegate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        ErrorChain, FieldValue, LogContext, LogOutput, LogWriterExt, Severity, SharedBuffer,
    };
    use crate::writers::CloudWriter;

    fn capture() -> (SharedWriter, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let writer = CloudWriter::new(Severity::Default).with_output(LogOutput::buffer(&buffer));
        (Arc::new(writer), buffer)
    }

    #[test]
    fn test_mutes_by_message() {
        let (delegate, buffer) = capture();
        let writer = MuteWriter::new(|r| r.message.contains("healthz"), delegate);

        writer.info("GET /healthz");
        writer.info("GET /orders");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("/orders"));
    }

    #[test]
    fn test_mutes_by_context_and_error() {
        let (delegate, buffer) = capture();
        let writer = when(|r| {
            r.context.get("client") == Some(&FieldValue::String("probe".into()))
                || r.error.map(|e| e.type_name == "Cancelled").unwrap_or(false)
        })
        .otherwise(delegate);

        writer.info_with("probe call", LogContext::new().with_field("client", "probe"), None);
        let cancelled = ErrorChain::new("Cancelled", "client went away");
        writer.warning_with("aborted", LogContext::new(), Some(&cancelled));
        writer.debug_with("kept", LogContext::new().with_field("client", "web"), None);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }

    #[test]
    fn test_no_own_gate() {
        let (delegate, buffer) = capture();
        let writer = MuteWriter::new(|_| false, delegate);
        writer.default("lowest level");
        assert_eq!(buffer.lines().len(), 1);
        assert_eq!(writer.config().min_severity(), Severity::Default);
    }

    #[test]
    fn test_builder_requires_both_parts() {
        let (delegate, _buffer) = capture();

        let err = MuteWriter::builder().delegate(delegate.clone()).build().err().unwrap();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = MuteWriter::builder().when(|_| true).build().err().unwrap();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        assert!(MuteWriter::builder().when(|_| true).delegate(delegate).build().is_ok());
    }
}
