//! `log` facade integration
//!
//! Libraries that log through the `log` crate end up in whatever writer is
//! current at the call site, including scoped per-request writers. A value
//! captured as an error (`err:err = e`) becomes the record's error chain
//! instead of a context field.
//!
//! ```no_run
//! use structured_logger::adapters::LogBridge;
//!
//! LogBridge::init().expect("another logger is already installed");
//! log::info!(target: "orders", order_id = 42; "order accepted");
//! ```

use crate::core::{scope, ErrorChain, LogContext, LogWriter, LoggerError, Result, Severity};
use log::kv::{self, VisitSource};

/// Context key carrying the `log` target
pub const CATEGORY_NAME_KEY: &str = "categoryName";

/// Replacement for the message-template placeholder key
pub const MESSAGE_TEMPLATE_KEY: &str = "messageTemplate";

const ORIGINAL_FORMAT_KEY: &str = "{OriginalFormat}";

/// `log::Log` implementation that forwards to [`scope::current`]
///
/// Always reports itself enabled; the resolved writer's severity gate does
/// the filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBridge;

impl LogBridge {
    pub fn new() -> Self {
        Self
    }

    /// Install the bridge as the `log` facade's logger
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a logger was already installed.
    pub fn init() -> Result<()> {
        log::set_boxed_logger(Box::new(Self::new()))
            .map_err(|e| LoggerError::config("LogBridge", e.to_string()))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    /// Map a facade level onto the severity scale
    pub fn severity_for(level: log::Level) -> Severity {
        match level {
            log::Level::Trace | log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warning,
            log::Level::Error => Severity::Error,
        }
    }

    fn collect(record: &log::Record<'_>) -> ContextCollector {
        let mut collector = ContextCollector::default();

        if !record.target().is_empty() {
            collector.context.add_field(CATEGORY_NAME_KEY, record.target());
        }

        if let Err(e) = record.key_values().visit(&mut collector) {
            eprintln!("[LOGGER ERROR] LogBridge could not read record fields: {}", e);
        }

        collector
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let writer = scope::current();
        let severity = Self::severity_for(record.level());
        if !writer.is_enabled(severity) {
            return;
        }

        let message = record.args().to_string();
        let collected = Self::collect(record);
        writer.log(severity, &message, collected.context, collected.error.as_ref());
    }

    fn flush(&self) {}
}

/// Apply the context key rules to a facade key
///
/// Returns `None` for keys that are dropped.
pub fn normalize_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    if key == ORIGINAL_FORMAT_KEY {
        return Some(MESSAGE_TEMPLATE_KEY.to_string());
    }
    if key.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(format!("_{}", key));
    }
    Some(key.to_string())
}

/// The first error-valued pair becomes the error; later ones stay fields
#[derive(Default)]
struct ContextCollector {
    context: LogContext,
    error: Option<ErrorChain>,
}

impl<'kvs> VisitSource<'kvs> for ContextCollector {
    fn visit_pair(
        &mut self,
        key: kv::Key<'kvs>,
        value: kv::Value<'kvs>,
    ) -> std::result::Result<(), kv::Error> {
        if self.error.is_none() {
            if let Some(error) = value.to_borrowed_error() {
                self.error = Some(ErrorChain::from_dyn(error));
                return Ok(());
            }
        }
        if let Some(key) = normalize_key(key.as_str()) {
            self.context.add_field(key, value.to_string());
        }
        Ok(())
    }
}
