//! Writer that accepts everything and outputs nothing

use crate::core::{LogRecord, LogWriter, Result, Severity, WriterConfig};

/// No-op writer; still applies the severity gate
#[derive(Debug, Clone)]
pub struct DiscardWriter {
    config: WriterConfig,
}

impl DiscardWriter {
    pub fn new(min_severity: Severity) -> Self {
        Self {
            config: WriterConfig::new(min_severity),
        }
    }
}

impl LogWriter for DiscardWriter {
    fn config(&self) -> &WriterConfig {
        &self.config
    }

    fn emit(&self, _record: &LogRecord<'_>) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}
