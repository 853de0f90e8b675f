//! Errors raised while configuring writers or emitting records
//!
//! Only construction surfaces these to callers; emission failures are
//! reported on stderr by the writer and counted in the output metrics.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("I/O failure while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O failure: {0}")]
    IoError(#[from] std::io::Error),

    /// A record could not be rendered as JSON
    #[error("JSON encoding failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Missing or invalid constructor argument
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Text that does not name a severity
    #[error("Invalid severity: '{0}'")]
    InvalidSeverity(String),

    /// A sink failed to emit a record
    #[error("Writer failed: {0}")]
    WriterError(String),
}

impl LoggerError {
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// `component` names the writer or setting that was rejected
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn severity(text: impl Into<String>) -> Self {
        LoggerError::InvalidSeverity(text.into())
    }

    pub fn writer(message: impl Into<String>) -> Self {
        LoggerError::WriterError(message.into())
    }
}
