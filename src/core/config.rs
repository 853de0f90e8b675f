//! Logger configuration and writer construction

use super::error::{LoggerError, Result};
use super::severity::Severity;
use super::writer::{SharedWriter, DEFAULT_CORRELATION_ID_KEY};
use crate::writers::{CloudWriter, ConsoleWriter, DiscardWriter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which sink [`LoggerConfig::build_writer`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterKind {
    /// Human-readable lines for terminals
    #[default]
    Console,
    /// One cloud-logging JSON object per line
    Cloud,
    Discard,
}

impl FromStr for WriterKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "console" | "text" => Ok(WriterKind::Console),
            "cloud" | "json" => Ok(WriterKind::Cloud),
            "discard" | "none" | "off" => Ok(WriterKind::Discard),
            other => Err(LoggerError::config(
                "LOG_FORMAT",
                format!("unknown writer kind '{}'", other),
            )),
        }
    }
}

impl fmt::Display for WriterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriterKind::Console => "console",
            WriterKind::Cloud => "cloud",
            WriterKind::Discard => "discard",
        })
    }
}

/// Settings for the process-wide writer
///
/// Deserializable so embedders can load it from their own configuration
/// files; [`LoggerConfig::from_env`] covers the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: WriterKind,
    pub min_severity: Severity,
    /// Reported as `serviceContext.service` by the cloud writer
    pub service_name: String,
    pub service_version: String,
    pub labels: BTreeMap<String, String>,
    pub use_colors: bool,
    /// Leave `time` out of cloud records and let the ingester stamp them
    pub defer_timestamp: bool,
    pub pretty_print: bool,
    pub correlation_id_key: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: WriterKind::Console,
            min_severity: Severity::Info,
            service_name: String::new(),
            service_version: String::new(),
            labels: BTreeMap::new(),
            use_colors: true,
            defer_timestamp: false,
            pretty_print: false,
            correlation_id_key: DEFAULT_CORRELATION_ID_KEY.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `LOG_FORMAT`: console, cloud or discard
    /// - `LOG_MIN_SEVERITY`: any severity name
    /// - `LOG_SERVICE_NAME`, `LOG_SERVICE_VERSION`
    /// - `LOG_PRETTY`, `LOG_COLORS`, `LOG_DEFER_TIMESTAMP`: true/false
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeverity` or `InvalidConfiguration` for values that
    /// do not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(format) = lookup("LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Some(severity) = lookup("LOG_MIN_SEVERITY") {
            config.min_severity = severity.parse()?;
        }
        if let Some(name) = lookup("LOG_SERVICE_NAME") {
            config.service_name = name;
        }
        if let Some(version) = lookup("LOG_SERVICE_VERSION") {
            config.service_version = version;
        }
        if let Some(pretty) = lookup("LOG_PRETTY") {
            config.pretty_print = parse_flag("LOG_PRETTY", &pretty)?;
        }
        if let Some(colors) = lookup("LOG_COLORS") {
            config.use_colors = parse_flag("LOG_COLORS", &colors)?;
        }
        if let Some(defer) = lookup("LOG_DEFER_TIMESTAMP") {
            config.defer_timestamp = parse_flag("LOG_DEFER_TIMESTAMP", &defer)?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_format(mut self, format: WriterKind) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_min_severity(mut self, min_severity: Severity) -> Self {
        self.min_severity = min_severity;
        self
    }

    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.service_name = name.into();
        self.service_version = version.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Build the writer these settings describe
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `correlation_id_key` is empty.
    pub fn build_writer(&self) -> Result<SharedWriter> {
        let writer: SharedWriter = match self.format {
            WriterKind::Console => Arc::new(
                ConsoleWriter::new(self.min_severity)
                    .with_colors(self.use_colors)
                    .with_correlation_id_key(self.correlation_id_key.as_str())?,
            ),
            WriterKind::Cloud => {
                let mut writer = CloudWriter::new(self.min_severity)
                    .with_service_context(
                        self.service_name.as_str(),
                        self.service_version.as_str(),
                    )
                    .with_labels(self.labels.clone())
                    .with_correlation_id_key(self.correlation_id_key.as_str())?;
                if self.defer_timestamp {
                    writer = writer.with_cloud_timestamp_deferred();
                }
                if self.pretty_print {
                    writer = writer.with_pretty_print();
                }
                Arc::new(writer)
            }
            WriterKind::Discard => Arc::new(DiscardWriter::new(self.min_severity)),
        };
        Ok(writer)
    }
}

fn parse_flag(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LoggerError::config(
            variable,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}
