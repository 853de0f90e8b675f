//! Timestamp formatting utilities
//!
//! Console lines use a configurable format; the cloud writer always emits
//! RFC 3339 with nanoseconds in UTC, which the ingestion pipeline parses as
//! the entry's `time`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How console lines render the record time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with nanoseconds and `Z`: `2025-01-08T10:30:45.123456000Z`
    Rfc3339Nanos,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use structured_logger::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, time: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => time.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Iso8601Micros => time.to_rfc3339_opts(SecondsFormat::Micros, true),
            TimestampFormat::Rfc3339Nanos => time.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimestampFormat::UnixMillis => time.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => time.format(pattern).to_string(),
        }
    }
}
