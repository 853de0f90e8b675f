//! Cloud JSON writer for structured logging
//!
//! Writes each record as a single-line JSON object on the output channel,
//! using the special payload fields that the cloud logging agent lifts into
//! the log entry (`severity`, `time`, `httpRequest`, labels) and the
//! error-report event shape that error tracking picks up automatically.

use crate::core::{
    HttpRequestSnapshot, LogOutput, LogRecord, LogWriter, Result, Severity, TimestampFormat,
    WriterConfig,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// `@type` value marking a payload as an error-report event
pub const ERROR_REPORT_TYPE: &str =
    "type.googleapis.com/google.devtools.clouderrorreporting.v1beta1.ReportedErrorEvent";

/// Payload key holding the static labels
pub const LABELS_KEY: &str = "logging.googleapis.com/labels";

mod keys {
    pub const SEVERITY: &str = "severity";
    pub const MESSAGE: &str = "message";
    pub const TIME: &str = "time";
    pub const SERVICE_CONTEXT: &str = "serviceContext";
    pub const SERVICE: &str = "service";
    pub const VERSION: &str = "version";
    pub const ERROR: &str = "error";
    pub const TYPE: &str = "@type";
    pub const HTTP_REQUEST: &str = "httpRequest";
    pub const DATA: &str = "data";
}

/// Writer producing the cloud log-ingestion JSON schema
///
/// All `with_*` methods leave the receiver untouched and return a new writer,
/// so one base writer built at start-up can be specialized per request from
/// many threads at once.
///
/// ```
/// use structured_logger::prelude::*;
///
/// let base = CloudWriter::new(Severity::Info)
///     .with_service_context("checkout", "1.4.2")
///     .with_label("region", "eu-west1");
///
/// let per_request = base.with_correlation_id("3f1c9a");
/// per_request.info("order accepted");
/// ```
#[derive(Debug, Clone)]
pub struct CloudWriter {
    config: WriterConfig,
    service_name: Option<String>,
    service_version: Option<String>,
    defer_timestamp: bool,
    labels: BTreeMap<String, String>,
    http_request: Option<Arc<HttpRequestSnapshot>>,
    pretty: bool,
    output: LogOutput,
}

impl CloudWriter {
    pub fn new(min_severity: Severity) -> Self {
        Self {
            config: WriterConfig::new(min_severity),
            service_name: None,
            service_version: None,
            defer_timestamp: false,
            labels: BTreeMap::new(),
            http_request: None,
            pretty: false,
            output: LogOutput::stdout(),
        }
    }

    #[must_use]
    pub fn with_min_severity(&self, min_severity: Severity) -> Self {
        Self {
            config: self.config.with_min_severity(min_severity),
            ..self.clone()
        }
    }

    /// Static service identity; empty values are omitted from the output
    #[must_use]
    pub fn with_service_context(
        &self,
        service_name: impl Into<String>,
        service_version: impl Into<String>,
    ) -> Self {
        Self {
            service_name: Some(service_name.into()),
            service_version: Some(service_version.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_label(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut labels = self.labels.clone();
        labels.insert(key.into(), value.into());
        Self {
            labels,
            ..self.clone()
        }
    }

    /// Add several labels; existing keys are overwritten
    #[must_use]
    pub fn with_labels<I, K, V>(&self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.labels.clone();
        merged.extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self {
            labels: merged,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_correlation_id(&self, correlation_id: impl Into<String>) -> Self {
        Self {
            config: self.config.with_correlation_id(correlation_id),
            ..self.clone()
        }
    }

    pub fn with_correlation_id_key(&self, key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            config: self.config.with_correlation_id_key(key)?,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_http_request(&self, snapshot: HttpRequestSnapshot) -> Self {
        Self {
            http_request: Some(Arc::new(snapshot)),
            ..self.clone()
        }
    }

    /// Leave `time` out and let the ingestion pipeline stamp entries
    #[must_use]
    pub fn with_cloud_timestamp_deferred(&self) -> Self {
        Self {
            defer_timestamp: true,
            ..self.clone()
        }
    }

    /// Indented multi-line JSON, for reading output during development
    #[must_use]
    pub fn with_pretty_print(&self) -> Self {
        Self {
            pretty: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_output(&self, output: LogOutput) -> Self {
        Self {
            output,
            ..self.clone()
        }
    }

    /// The writer for one inbound request
    #[must_use]
    pub fn for_request(
        &self,
        snapshot: HttpRequestSnapshot,
        correlation_id: impl Into<String>,
    ) -> Self {
        self.with_http_request(snapshot)
            .with_correlation_id(correlation_id)
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn output(&self) -> &LogOutput {
        &self.output
    }

    /// Build the JSON payload for one record
    pub fn to_json_value(&self, record: &LogRecord<'_>) -> Value {
        let mut entry = Map::new();

        entry.insert(
            keys::SEVERITY.to_string(),
            Value::String(record.severity.as_str().to_string()),
        );
        entry.insert(
            keys::MESSAGE.to_string(),
            Value::String(record.message.to_string()),
        );

        if !self.defer_timestamp {
            entry.insert(
                keys::TIME.to_string(),
                Value::String(TimestampFormat::Rfc3339Nanos.format(&record.timestamp)),
            );
        }

        if let Some(service_context) = self.service_context() {
            entry.insert(keys::SERVICE_CONTEXT.to_string(), service_context);
        }

        if let Some(error) = record.error {
            entry.insert(
                keys::TYPE.to_string(),
                Value::String(ERROR_REPORT_TYPE.to_string()),
            );
            entry.insert(
                keys::ERROR.to_string(),
                serde_json::to_value(error).unwrap_or(Value::Null),
            );
        }

        if let Some(ref snapshot) = self.http_request {
            entry.insert(
                keys::HTTP_REQUEST.to_string(),
                serde_json::to_value(snapshot.as_ref()).unwrap_or(Value::Null),
            );
        }

        if !self.labels.is_empty() {
            let labels = self
                .labels
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            entry.insert(LABELS_KEY.to_string(), Value::Object(labels));
        }

        if !record.context.is_empty() {
            entry.insert(
                keys::DATA.to_string(),
                Value::Object(record.context.to_json_map()),
            );
        }

        Value::Object(entry)
    }

    /// Serialize one record the way [`LogWriter::emit`] writes it
    pub fn to_json_line(&self, record: &LogRecord<'_>) -> Result<String> {
        let value = self.to_json_value(record);
        let json = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }

    fn service_context(&self) -> Option<Value> {
        let mut context = Map::new();
        if let Some(name) = self.service_name.as_deref().filter(|s| !s.is_empty()) {
            context.insert(keys::SERVICE.to_string(), Value::String(name.to_string()));
        }
        if let Some(version) = self.service_version.as_deref().filter(|s| !s.is_empty()) {
            context.insert(keys::VERSION.to_string(), Value::String(version.to_string()));
        }
        (!context.is_empty()).then_some(Value::Object(context))
    }
}

impl LogWriter for CloudWriter {
    fn config(&self) -> &WriterConfig {
        &self.config
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<()> {
        let line = self.to_json_line(record)?;
        self.output.write_line(&line)
    }

    fn name(&self) -> &str {
        "cloud"
    }
}
