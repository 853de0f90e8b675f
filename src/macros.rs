//! Logging macros with `format!`-style messages
//!
//! The message is only formatted when the writer's gate accepts the
//! severity. An optional `{ key => value, .. }` block before the message
//! becomes the record context.
//!
//! # Examples
//!
//! ```
//! use structured_logger::prelude::*;
//! use structured_logger::{info, warning};
//!
//! let writer = ConsoleWriter::new(Severity::Debug);
//!
//! info!(writer, "Server started");
//!
//! let port = 8080;
//! info!(writer, "Server listening on port {}", port);
//!
//! warning!(writer, { "attempt" => 3, "max" => 5 }, "Retrying upstream call");
//! ```

/// Log at an explicit severity.
///
/// Works with writers, references and `SharedWriter` handles alike.
///
/// ```
/// # use structured_logger::prelude::*;
/// # use std::sync::Arc;
/// use structured_logger::log;
/// let writer: SharedWriter = Arc::new(DiscardWriter::new(Severity::Info));
/// log!(writer, Severity::Notice, "Simple message");
/// log!(writer, Severity::Error, { "code" => 500 }, "Request failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! log {
    ($writer:expr, $severity:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::LogWriter as _;
        let writer = &$writer;
        let severity = $severity;
        if writer.is_enabled(severity) {
            let context = $crate::LogContext::new()$(.with_field($key, $value))*;
            writer.log(severity, &::std::format!($($arg)+), context, None);
        }
    }};
    ($writer:expr, $severity:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::LogWriter as _;
        let writer = &$writer;
        let severity = $severity;
        if writer.is_enabled(severity) {
            writer.log(
                severity,
                &::std::format!($($arg)+),
                $crate::LogContext::new(),
                None,
            );
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use structured_logger::prelude::*;
/// # let writer = DiscardWriter::new(Severity::Debug);
/// use structured_logger::debug;
/// debug!(writer, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use structured_logger::prelude::*;
/// # let writer = DiscardWriter::new(Severity::Info);
/// use structured_logger::warning;
/// warning!(writer, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! alert {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($writer:expr, $($arg:tt)+) => {
        $crate::log!($writer, $crate::Severity::Emergency, $($arg)+)
    };
}
