//! Writer trait, shared configuration and the per-severity surface
//!
//! Every sink implements [`LogWriter::emit`]; the provided [`LogWriter::log`]
//! applies the severity gate and correlation id before calling it, and
//! absorbs any error or panic the sink produces.

use super::{
    error::{LoggerError, Result},
    error_chain::ErrorChain,
    log_context::LogContext,
    log_record::LogRecord,
    severity::Severity,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Context key used for the correlation id unless configured otherwise
pub const DEFAULT_CORRELATION_ID_KEY: &str = "correlationId";

/// Shared handle to any writer
pub type SharedWriter = Arc<dyn LogWriter>;

/// Settings common to every writer
///
/// Immutable: the `with_*` methods return a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    min_severity: Severity,
    correlation_id_key: String,
    correlation_id: Option<String>,
}

impl WriterConfig {
    pub fn new(min_severity: Severity) -> Self {
        Self {
            min_severity,
            correlation_id_key: DEFAULT_CORRELATION_ID_KEY.to_string(),
            correlation_id: None,
        }
    }

    #[must_use]
    pub fn with_min_severity(&self, min_severity: Severity) -> Self {
        Self {
            min_severity,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_correlation_id(&self, correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..self.clone()
        }
    }

    /// Change the context key the correlation id is written under
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `key` is empty.
    pub fn with_correlation_id_key(&self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(LoggerError::config(
                "WriterConfig",
                "correlation id key must not be empty",
            ));
        }
        Ok(Self {
            correlation_id_key: key,
            ..self.clone()
        })
    }

    #[inline]
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn correlation_id_key(&self) -> &str {
        &self.correlation_id_key
    }

    /// The correlation id, if one is set and non-empty
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

pub trait LogWriter: Send + Sync {
    fn config(&self) -> &WriterConfig;

    /// Sink-specific output of one record that already passed the gate
    fn emit(&self, record: &LogRecord<'_>) -> Result<()>;

    fn name(&self) -> &str;

    #[inline]
    fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.config().min_severity()
    }

    /// Gate, stamp and emit one record
    ///
    /// Never fails: sink errors and panics are reported on stderr and
    /// dropped. Implementors override [`LogWriter::emit`], not this method.
    fn log(
        &self,
        severity: Severity,
        message: &str,
        mut context: LogContext,
        error: Option<&ErrorChain>,
    ) {
        if !self.is_enabled(severity) {
            return;
        }

        let config = self.config();
        if let Some(correlation_id) = config.correlation_id() {
            context.add_field(config.correlation_id_key(), correlation_id);
        }

        let record = LogRecord::new(severity, message)
            .with_context(context)
            .with_error(error);

        isolate(self.name(), || self.emit(&record));
    }
}

/// Run one sink operation, reporting and swallowing errors and panics
///
/// Returns `true` when the operation succeeded.
pub(crate) fn isolate<F>(writer_name: &str, operation: F) -> bool
where
    F: FnOnce() -> Result<()>,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(operation)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            eprintln!("[LOGGER ERROR] Writer '{}' failed: {}", writer_name, e);
            false
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER CRITICAL] Writer '{}' panicked: {}. \
                 The record was dropped.",
                writer_name, panic_msg
            );
            false
        }
    }
}

macro_rules! severity_methods {
    ($($(#[$doc:meta])* $name:ident, $name_with:ident => $severity:ident;)+) => {
        $(
            $(#[$doc])*
            #[inline]
            fn $name(&self, message: impl AsRef<str>) {
                self.log(Severity::$severity, message.as_ref(), LogContext::new(), None);
            }

            $(#[$doc])*
            #[inline]
            fn $name_with(
                &self,
                message: impl AsRef<str>,
                context: LogContext,
                error: Option<&ErrorChain>,
            ) {
                self.log(Severity::$severity, message.as_ref(), context, error);
            }
        )+
    };
}

/// One operation per severity, available on every writer
///
/// ```
/// use structured_logger::prelude::*;
///
/// let writer = DiscardWriter::new(Severity::Debug);
/// writer.info("started");
/// writer.warning_with("slow response", LogContext::new().with_field("ms", 950), None);
/// ```
pub trait LogWriterExt: LogWriter {
    severity_methods! {
        /// (0) The log entry has no assigned severity level.
        default, default_with => Default;
        /// (100) Debug or trace information.
        debug, debug_with => Debug;
        /// (200) Routine information.
        info, info_with => Info;
        /// (300) Normal but significant events.
        notice, notice_with => Notice;
        /// (400) Warning events might cause problems.
        warning, warning_with => Warning;
        /// (500) Error events are likely to cause problems.
        error, error_with => Error;
        /// (600) Critical events cause more severe problems or outages.
        critical, critical_with => Critical;
        /// (700) A person must take an action immediately.
        alert, alert_with => Alert;
        /// (800) One or more systems are unusable.
        emergency, emergency_with => Emergency;
    }
}

impl<W: LogWriter + ?Sized> LogWriterExt for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_context::FieldValue;
    use parking_lot::Mutex;

    struct Recording {
        config: WriterConfig,
        seen: Mutex<Vec<(Severity, String, LogContext)>>,
    }

    impl Recording {
        fn new(config: WriterConfig) -> Self {
            Self {
                config,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl LogWriter for Recording {
        fn config(&self) -> &WriterConfig {
            &self.config
        }

        fn emit(&self, record: &LogRecord<'_>) -> Result<()> {
            self.seen.lock().push((
                record.severity,
                record.message.to_string(),
                record.context.clone(),
            ));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct Panicking(WriterConfig);

    impl LogWriter for Panicking {
        fn config(&self) -> &WriterConfig {
            &self.0
        }

        fn emit(&self, _record: &LogRecord<'_>) -> Result<()> {
            panic!("sink exploded")
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_gate_discards_below_minimum() {
        let writer = Recording::new(WriterConfig::new(Severity::Warning));
        writer.debug("noisy");
        writer.info("still noisy");
        writer.warning("kept");
        writer.emergency("kept too");

        let seen = writer.seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, Severity::Warning);
        assert_eq!(seen[1].0, Severity::Emergency);
    }

    #[test]
    fn test_correlation_id_injected_under_key() {
        let config = WriterConfig::new(Severity::Info)
            .with_correlation_id_key("cid")
            .unwrap()
            .with_correlation_id("abc123");
        let writer = Recording::new(config);

        writer.info_with("started", LogContext::new().with_field("port", 8080), None);

        let seen = writer.seen.lock();
        assert_eq!(seen[0].1, "started");
        assert_eq!(seen[0].2.get("port"), Some(&FieldValue::Int(8080)));
        assert_eq!(seen[0].2.get("cid"), Some(&FieldValue::String("abc123".into())));
    }

    #[test]
    fn test_correlation_id_overwrites_caller_value() {
        let writer = Recording::new(WriterConfig::default().with_correlation_id("mine"));
        writer.info_with(
            "x",
            LogContext::new().with_field(DEFAULT_CORRELATION_ID_KEY, "caller"),
            None,
        );

        let seen = writer.seen.lock();
        assert_eq!(
            seen[0].2.get(DEFAULT_CORRELATION_ID_KEY),
            Some(&FieldValue::String("mine".into()))
        );
    }

    #[test]
    fn test_empty_correlation_id_is_not_injected() {
        let writer = Recording::new(WriterConfig::default().with_correlation_id(""));
        writer.info("x");
        assert!(writer.seen.lock()[0].2.is_empty());
    }

    #[test]
    fn test_empty_correlation_id_key_rejected() {
        let err = WriterConfig::default().with_correlation_id_key("  ").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_config_builders_do_not_mutate() {
        let base = WriterConfig::new(Severity::Info);
        let _derived = base.with_correlation_id("abc").with_min_severity(Severity::Error);
        assert_eq!(base, WriterConfig::new(Severity::Info));
    }

    #[test]
    fn test_panicking_sink_does_not_unwind() {
        let writer = Panicking(WriterConfig::default());
        writer.error("boom");
    }

    #[test]
    fn test_ext_methods_work_on_trait_objects() {
        let writer: SharedWriter = Arc::new(Recording::new(WriterConfig::new(Severity::Default)));
        writer.default("a");
        writer.notice("b");
        writer.log(Severity::Alert, "c", LogContext::new(), None);
        assert!(writer.is_enabled(Severity::Default));
    }
}
