//! Log record structure

use super::error_chain::ErrorChain;
use super::log_context::LogContext;
use super::severity::Severity;
use chrono::{DateTime, Utc};

/// The unit handed to a writer's emit step
///
/// Borrowed from the call site for the duration of one `log` call and
/// never retained by a writer.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub severity: Severity,
    pub message: &'a str,
    pub context: LogContext,
    pub error: Option<&'a ErrorChain>,
    pub timestamp: DateTime<Utc>,
}

impl<'a> LogRecord<'a> {
    pub fn new(severity: Severity, message: &'a str) -> Self {
        Self {
            severity,
            message,
            context: LogContext::new(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_error(mut self, error: Option<&'a ErrorChain>) -> Self {
        self.error = error;
        self
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
