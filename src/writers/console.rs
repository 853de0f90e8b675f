//! Console writer implementation

use crate::core::{
    ErrorChain, LogOutput, LogRecord, LogWriter, Result, Severity, TimestampFormat, WriterConfig,
};

/// Human-readable writer
///
/// Layout: `<timestamp> [<SEVERITY>] <correlationId?> <message> <key=value ...>`,
/// followed by one block per error in the attached chain.
#[derive(Debug, Clone)]
pub struct ConsoleWriter {
    config: WriterConfig,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output: LogOutput,
}

impl ConsoleWriter {
    pub fn new(min_severity: Severity) -> Self {
        Self {
            config: WriterConfig::new(min_severity),
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            output: LogOutput::stdout(),
        }
    }

    #[must_use]
    pub fn with_colors(&self, use_colors: bool) -> Self {
        Self {
            use_colors,
            ..self.clone()
        }
    }

    /// Set the timestamp format for this writer
    ///
    /// ```
    /// use structured_logger::{ConsoleWriter, Severity, TimestampFormat};
    ///
    /// let writer = ConsoleWriter::new(Severity::Info)
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(&self, format: TimestampFormat) -> Self {
        Self {
            timestamp_format: format,
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
    pub fn with_min_severity(&self, min_severity: Severity) -> Self {
        Self {
            config: self.config.with_min_severity(min_severity),
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

    pub fn output(&self) -> &LogOutput {
        &self.output
    }

    /// Render a record without colors
    pub fn format_record(&self, record: &LogRecord<'_>) -> String {
        let mut text = format!(
            "{} [{}]",
            self.timestamp_format.format(&record.timestamp),
            record.severity
        );

        let correlation_id = self.config.correlation_id();
        if let Some(id) = correlation_id {
            text.push(' ');
            text.push_str(id);
        }

        text.push(' ');
        text.push_str(&sanitize_message(record.message));

        let fields: Vec<String> = record
            .context
            .fields()
            .iter()
            .filter(|(key, _)| {
                correlation_id.is_none() || key.as_str() != self.config.correlation_id_key()
            })
            .map(|(key, value)| sanitize_message(&format!("{}={}", key, value)))
            .collect();
        if !fields.is_empty() {
            text.push(' ');
            text.push_str(&fields.join(" "));
        }

        if let Some(error) = record.error {
            append_error_blocks(&mut text, error);
        }

        text
    }
}

impl LogWriter for ConsoleWriter {
    fn config(&self) -> &WriterConfig {
        &self.config
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<()> {
        let text = self.format_record(record);
        let text = if self.use_colors {
            paint(record.severity, &text)
        } else {
            text
        };
        self.output.write_line(&text)
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Escape line breaks so a message cannot forge extra log lines
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn append_error_blocks(text: &mut String, error: &ErrorChain) {
    for (index, link) in error.iter().enumerate() {
        if index > 0 {
            text.push_str("\n---- Caused by ----");
        }
        text.push_str("\n    Error Type: ");
        text.push_str(&link.type_name);
        text.push_str("\n    Error Message: ");
        text.push_str(&link.message);
        if !link.trace.is_empty() {
            text.push_str("\n    Trace:");
            for line in link.trace.lines() {
                text.push_str("\n        ");
                text.push_str(line);
            }
        }
    }
}

#[cfg(feature = "console")]
fn paint(severity: Severity, text: &str) -> String {
    use colored::Colorize;

    match severity {
        Severity::Default => text.normal(),
        Severity::Debug => text.dimmed(),
        Severity::Info => text.white(),
        Severity::Notice => text.green(),
        Severity::Warning => text.yellow(),
        Severity::Error => text.magenta(),
        Severity::Critical => text.bright_magenta(),
        Severity::Alert => text.red(),
        Severity::Emergency => text.white().on_red(),
    }
    .to_string()
}

#[cfg(not(feature = "console"))]
fn paint(_severity: Severity, text: &str) -> String {
    text.to_string()
}
