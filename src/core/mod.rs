//! Core types: severities, records, the writer trait and scope resolution

pub mod config;
pub mod correlation;
pub mod error;
pub mod error_chain;
pub mod http_request;
pub mod log_context;
pub mod log_record;
pub mod metrics;
pub mod output;
pub mod scope;
pub mod severity;
pub mod timestamp;
pub mod writer;

pub use config::{LoggerConfig, WriterKind};
pub use correlation::new_correlation_id;
pub use error::{LoggerError, Result};
pub use error_chain::{ChainIter, ErrorChain, MAX_ERROR_CHAIN_DEPTH};
pub use http_request::HttpRequestSnapshot;
pub use log_context::{FieldValue, LogContext};
pub use log_record::LogRecord;
pub use metrics::OutputMetrics;
pub use output::{LogOutput, SharedBuffer};
pub use severity::Severity;
pub use timestamp::TimestampFormat;
pub use writer::{LogWriter, LogWriterExt, SharedWriter, WriterConfig, DEFAULT_CORRELATION_ID_KEY};
