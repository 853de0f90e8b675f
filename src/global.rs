//! Ambient entry point
//!
//! Free functions that log through [`scope::current`](crate::scope::current),
//! so code deep in a call tree can log without being handed a writer.
//!
//! ```
//! use structured_logger::global;
//! use structured_logger::prelude::*;
//!
//! global::info("cache warmed");
//! global::warning_with(
//!     "slow query",
//!     LogContext::new().with_field("ms", 1250),
//!     None,
//! );
//! ```

use crate::core::{scope, ErrorChain, LogContext, LogWriter, Severity};

/// Log through the current writer at any severity
pub fn log(severity: Severity, message: &str, context: LogContext, error: Option<&ErrorChain>) {
    scope::current().log(severity, message, context, error);
}

/// Whether the current writer would keep a record at `severity`
pub fn is_enabled(severity: Severity) -> bool {
    scope::current().is_enabled(severity)
}

macro_rules! global_severity_fns {
    ($($name:ident, $name_with:ident => $severity:ident;)+) => {
        $(
            #[inline]
            pub fn $name(message: impl AsRef<str>) {
                log(Severity::$severity, message.as_ref(), LogContext::new(), None);
            }

            #[inline]
            pub fn $name_with(
                message: impl AsRef<str>,
                context: LogContext,
                error: Option<&ErrorChain>,
            ) {
                log(Severity::$severity, message.as_ref(), context, error);
            }
        )+
    };
}

global_severity_fns! {
    default, default_with => Default;
    debug, debug_with => Debug;
    info, info_with => Info;
    notice, notice_with => Notice;
    warning, warning_with => Warning;
    error, error_with => Error;
    critical, critical_with => Critical;
    alert, alert_with => Alert;
    emergency, emergency_with => Emergency;
}
