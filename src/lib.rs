//! # Structured Logger
//!
//! Severity-gated structured logging with per-request writer scoping.
//!
//! ## Features
//!
//! - **Nine severities**: the cloud-logging scale from `DEFAULT` to `EMERGENCY`
//! - **Structured context**: key/value fields and full error chains on every record
//! - **Cloud JSON**: one cloud-logging JSON object per line, error-reporting ready
//! - **Scoped writers**: bind a writer to a request and resolve it anywhere below
//! - **Composable**: fan-out, predicate muting and discard writers
//!
//! ## Example
//!
//! ```
//! use structured_logger::prelude::*;
//!
//! let writer = CloudWriter::new(Severity::Info)
//!     .with_service_context("checkout", "1.4.2")
//!     .with_correlation_id(new_correlation_id());
//!
//! writer.info_with(
//!     "order placed",
//!     LogContext::new().with_field("orderId", 1187).with_field("total", 42.5),
//!     None,
//! );
//!
//! let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "payment gateway");
//! writer.error_with("charge failed", LogContext::new(), Some(&ErrorChain::capture(&failure)));
//! ```

pub mod adapters;
pub mod core;
pub mod global;
pub mod macros;
pub mod writers;

pub use self::core::scope;

pub mod prelude {
    pub use crate::core::{
        new_correlation_id, scope, ErrorChain, FieldValue, HttpRequestSnapshot, LogContext,
        LogOutput, LogRecord, LogWriter, LogWriterExt, LoggerConfig, LoggerError, Result,
        Severity, SharedBuffer, SharedWriter, TimestampFormat, WriterConfig,
    };
    pub use crate::writers::{CloudWriter, ConsoleWriter, DiscardWriter, FanOutWriter, MuteWriter};
}

pub use adapters::LogBridge;
pub use self::core::{
    new_correlation_id, ChainIter, ErrorChain, FieldValue, HttpRequestSnapshot, LogContext,
    LogOutput, LogRecord, LogWriter, LogWriterExt, LoggerConfig, LoggerError, OutputMetrics,
    Result, Severity, SharedBuffer, SharedWriter, TimestampFormat, WriterConfig, WriterKind,
    DEFAULT_CORRELATION_ID_KEY, MAX_ERROR_CHAIN_DEPTH,
};
pub use writers::{
    CloudWriter, ConsoleWriter, DiscardWriter, FanOutWriter, MuteWriter, MuteWriterBuilder,
};
