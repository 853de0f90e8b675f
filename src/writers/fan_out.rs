//! Writer that forwards each record to several child writers

use crate::core::{
    writer::isolate, LogRecord, LogWriter, LoggerError, Result, Severity, SharedWriter,
    WriterConfig,
};

/// Delegates every record to its children in construction order
///
/// Each child applies its own gate and correlation id. A child that fails
/// or panics is reported and skipped; the remaining children still receive
/// the record.
pub struct FanOutWriter {
    config: WriterConfig,
    children: Vec<SharedWriter>,
}

impl FanOutWriter {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `children` is empty.
    pub fn new<I>(min_severity: Severity, children: I) -> Result<Self>
    where
        I: IntoIterator<Item = SharedWriter>,
    {
        let children: Vec<SharedWriter> = children.into_iter().collect();
        if children.is_empty() {
            return Err(LoggerError::config(
                "FanOutWriter",
                "at least one child writer is required",
            ));
        }

        Ok(Self {
            config: WriterConfig::new(min_severity),
            children,
        })
    }

    #[must_use]
    pub fn with_correlation_id(&self, correlation_id: impl Into<String>) -> Self {
        Self {
            config: self.config.with_correlation_id(correlation_id),
            children: self.children.clone(),
        }
    }

    pub fn children(&self) -> &[SharedWriter] {
        &self.children
    }
}

impl LogWriter for FanOutWriter {
    fn config(&self) -> &WriterConfig {
        &self.config
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<()> {
        let mut failed = 0usize;

        for child in &self.children {
            let delivered = isolate(child.name(), || {
                child.log(
                    record.severity,
                    record.message,
                    record.context.clone(),
                    record.error,
                );
                Ok(())
            });
            if !delivered {
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(LoggerError::writer(format!(
                "{} of {} child writers failed",
                failed,
                self.children.len()
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fan-out"
    }
}
