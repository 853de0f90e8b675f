//! Integration tests for structured_logger
//!
//! These tests verify:
//! - Severity gating for every pair of levels
//! - Correlation id injection
//! - Cloud JSON shape, including error chains
//! - Builder immutability
//! - Scope isolation between concurrent tasks
//! - Fan-out delivery when a child fails
//! - File output and console rendering

use serde_json::Value;
use structured_logger::prelude::*;
use structured_logger::writers::{mute, ERROR_REPORT_TYPE, LABELS_KEY};
use structured_logger::{global, LogBridge};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use tempfile::TempDir;

fn cloud_capture(min: Severity) -> (CloudWriter, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let writer = CloudWriter::new(min).with_output(LogOutput::buffer(&buffer));
    (writer, buffer)
}

fn parse_lines(buffer: &SharedBuffer) -> Vec<Value> {
    buffer
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
        .collect()
}

#[derive(Debug)]
struct IoFailure(String);

impl fmt::Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for IoFailure {}

#[derive(Debug)]
struct NullReference {
    message: String,
    source: IoFailure,
}

impl fmt::Display for NullReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for NullReference {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

#[test]
fn test_gate_for_every_severity_pair() {
    for &min in Severity::ALL.iter() {
        for &level in Severity::ALL.iter() {
            let (writer, buffer) = cloud_capture(min);
            writer.log(level, "probe", LogContext::new(), None);

            let emitted = buffer.lines().len();
            if level < min {
                assert_eq!(emitted, 0, "{} passed a {} gate", level, min);
            } else {
                assert_eq!(emitted, 1, "{} was dropped by a {} gate", level, min);
            }
        }
    }
}

#[test]
fn test_correlation_example() {
    let (writer, buffer) = cloud_capture(Severity::Info);
    let writer = writer
        .with_correlation_id_key("cid")
        .expect("non-empty key")
        .with_correlation_id("abc123");

    writer.info_with("started", LogContext::new().with_field("port", 8080), None);

    let records = parse_lines(&buffer);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["severity"], "INFO");
    assert_eq!(records[0]["message"], "started");
    assert_eq!(
        records[0]["data"],
        serde_json::json!({ "port": 8080, "cid": "abc123" })
    );
}

#[test]
fn test_warning_gate_drops_debug() {
    let (writer, buffer) = cloud_capture(Severity::Warning);
    writer.debug("noisy");
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_correlation_id_overwrites_caller_value() {
    let (writer, buffer) = cloud_capture(Severity::Info);
    let writer = writer.with_correlation_id("from-writer");

    writer.info_with(
        "x",
        LogContext::new().with_field("correlationId", "from-caller"),
        None,
    );

    assert_eq!(parse_lines(&buffer)[0]["data"]["correlationId"], "from-writer");
}

#[test]
fn test_cloud_error_example() {
    let (writer, buffer) = cloud_capture(Severity::Info);
    let writer = writer.with_service_context("svc", "v1");

    let failure = NullReference {
        message: "x".to_string(),
        source: IoFailure("y".to_string()),
    };
    writer.error_with(
        "lookup failed",
        LogContext::new(),
        Some(&ErrorChain::capture(&failure)),
    );

    let line = &buffer.lines()[0];
    assert!(!line.contains('\n'));
    let record: Value = serde_json::from_str(line).unwrap();

    assert_eq!(record["@type"], ERROR_REPORT_TYPE);
    assert_eq!(record["message"], "lookup failed");
    assert_eq!(record["serviceContext"]["service"], "svc");
    assert_eq!(record["serviceContext"]["version"], "v1");
    assert!(record["error"]["exceptionType"]
        .as_str()
        .unwrap()
        .ends_with("NullReference"));
    assert_eq!(record["error"]["exceptionMessage"], "x");
    assert_eq!(record["error"]["innerError"]["exceptionType"], "IoFailure");
    assert_eq!(record["error"]["innerError"]["exceptionMessage"], "y");
    assert!(record["error"]["innerError"].get("innerError").is_none());
}

#[test]
fn test_error_chain_length_matches_cause_hops() {
    let (writer, buffer) = cloud_capture(Severity::Default);

    for hops in 0..6 {
        let mut chain = ErrorChain::new(format!("Level{}", hops), "root");
        for level in (0..hops).rev() {
            chain = ErrorChain::new(format!("Level{}", level), "wrapper").with_cause(chain);
        }
        assert_eq!(chain.depth(), hops);

        buffer.clear();
        writer.error_with("failed", LogContext::new(), Some(&chain));

        let record = &parse_lines(&buffer)[0];
        let mut node = &record["error"];
        let mut seen_hops = 0;
        while let Some(inner) = node.get("innerError") {
            seen_hops += 1;
            node = inner;
        }
        assert_eq!(seen_hops, hops);
    }
}

#[test]
fn test_builders_never_mutate_base() {
    let (base, base_buffer) = cloud_capture(Severity::Info);

    let _a = base
        .with_label("team", "payments")
        .with_service_context("svc", "v1")
        .with_correlation_id("a");
    let _b = base
        .with_min_severity(Severity::Emergency)
        .with_labels([("env", "prod")])
        .with_cloud_timestamp_deferred()
        .with_pretty_print();

    base.info("after derivations");

    let record = &parse_lines(&base_buffer)[0];
    assert!(record.get(LABELS_KEY).is_none());
    assert!(record.get("serviceContext").is_none());
    assert!(record.get("data").is_none());
    assert!(record.get("time").is_some());
    assert!(base.labels().is_empty());
}

#[test]
fn test_labels_and_http_request() {
    let (writer, buffer) = cloud_capture(Severity::Info);
    let request = HttpRequestSnapshot::new("GET", "https://shop.example.com/cart")
        .with_user_agent("Mozilla/5.0")
        .with_remote_ip("198.51.100.23")
        .with_protocol("HTTP/2");
    let writer = writer
        .with_label("region", "eu-west1")
        .for_request(request, new_correlation_id());

    writer.notice("cart viewed");

    let record = &parse_lines(&buffer)[0];
    assert_eq!(record[LABELS_KEY]["region"], "eu-west1");
    assert_eq!(record["httpRequest"]["requestMethod"], "GET");
    assert_eq!(record["httpRequest"]["requestSize"], "0");
    assert_eq!(record["httpRequest"]["protocol"], "HTTP/2");
    assert_eq!(record["data"]["correlationId"].as_str().unwrap().len(), 36);
}

#[test]
fn test_fan_out_delivers_despite_failing_child() {
    struct Broken(WriterConfig);

    impl LogWriter for Broken {
        fn config(&self) -> &WriterConfig {
            &self.0
        }

        fn emit(&self, _record: &LogRecord<'_>) -> Result<()> {
            Err(LoggerError::writer("collector unreachable"))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    let (healthy, buffer) = cloud_capture(Severity::Default);
    let children: Vec<SharedWriter> = vec![
        Arc::new(Broken(WriterConfig::new(Severity::Default))),
        Arc::new(healthy),
    ];
    let fan_out = FanOutWriter::new(Severity::Info, children).unwrap();

    fan_out.error("payment declined");

    let records = parse_lines(&buffer);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["message"], "payment declined");
}

#[test]
fn test_mute_health_checks() {
    let (cloud, buffer) = cloud_capture(Severity::Debug);
    let writer = mute::when(|record| record.message.starts_with("GET /health"))
        .otherwise(Arc::new(cloud));

    writer.info("GET /health 200");
    writer.info("GET /orders 200");

    let records = parse_lines(&buffer);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["message"], "GET /orders 200");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_scope_isolation_between_tasks() {
    let (writer_a, buffer_a) = cloud_capture(Severity::Info);
    let writer_a: SharedWriter = Arc::new(writer_a.with_correlation_id("task-a"));

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel::<()>();
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();

    let task_a = tokio::spawn(scope::scope(writer_a, async move {
        scope::current().info("a: bound");
        ready_tx.send(()).unwrap();
        done_rx.await.unwrap();
        scope::current().info("a: still bound");
    }));

    let task_b = tokio::spawn(async move {
        ready_rx.await.unwrap();
        let seen = scope::current();
        done_tx.send(()).unwrap();
        seen
    });

    let seen_by_b = task_b.await.unwrap();
    task_a.await.unwrap();

    assert!(Arc::ptr_eq(&seen_by_b, &scope::default_writer()));
    let records = parse_lines(&buffer_a);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["data"]["correlationId"] == "task-a"));
}

#[tokio::test]
async fn test_global_functions_follow_scope() {
    let (writer, buffer) = cloud_capture(Severity::Debug);

    scope::scope(Arc::new(writer), async {
        global::debug("inside scope");
        scope::spawn(async { global::info("inside spawned task") })
            .await
            .unwrap();
    })
    .await;

    let messages: Vec<String> = parse_lines(&buffer)
        .iter()
        .map(|r| r["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["inside scope", "inside spawned task"]);
}

#[test]
fn test_log_bridge_installs_once() {
    let (writer, buffer) = cloud_capture(Severity::Debug);

    LogBridge::init().expect("first installation succeeds");
    assert!(matches!(
        LogBridge::init(),
        Err(LoggerError::InvalidConfiguration { .. })
    ));

    scope::sync_scope(Arc::new(writer), || {
        log::warn!(target: "billing", "invoice {} overdue", 77);
    });

    let record = &parse_lines(&buffer)[0];
    assert_eq!(record["severity"], "WARNING");
    assert_eq!(record["message"], "invoice 77 overdue");
    assert_eq!(record["data"]["categoryName"], "billing");
}

#[test]
fn test_file_output_appends_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("service.log");

    let writer = CloudWriter::new(Severity::Info)
        .with_output(LogOutput::file(&log_file).expect("Failed to open log file"));
    writer.info("first");
    writer.warning("second");

    let reopened = ConsoleWriter::new(Severity::Info)
        .with_colors(false)
        .with_output(LogOutput::file(&log_file).expect("Failed to reopen log file"));
    reopened.info("third");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("\"first\""));
    assert!(lines[2].contains("[INFO] third"));
    assert_eq!(writer.output().metrics().lines_written(), 2);
}

#[test]
fn test_file_output_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = LogOutput::file(temp_dir.path().join("missing").join("app.log")).unwrap_err();
    assert!(matches!(err, LoggerError::IoOperation { .. }));
}

#[test]
fn test_console_error_block() {
    let buffer = SharedBuffer::new();
    let writer = ConsoleWriter::new(Severity::Info)
        .with_colors(false)
        .with_output(LogOutput::buffer(&buffer));

    let chain = ErrorChain::new("Timeout", "gateway").with_cause(ErrorChain::new("Io", "reset"));
    writer.error_with("charge failed", LogContext::new().with_field("orderId", 9), Some(&chain));

    let content = buffer.contents();
    assert!(content.contains("[ERROR] charge failed orderId=9"));
    assert!(content.contains("Error Type: Timeout"));
    assert!(content.contains("---- Caused by ----"));
    assert!(content.contains("Error Message: reset"));
}

#[test]
fn test_config_driven_writer() {
    let config = LoggerConfig::default()
        .with_format(structured_logger::WriterKind::Cloud)
        .with_min_severity(Severity::Notice)
        .with_service("inventory", "2.0.1")
        .with_label("tier", "backend");

    let writer = config.build_writer().unwrap();
    assert!(!writer.is_enabled(Severity::Info));
    assert!(writer.is_enabled(Severity::Notice));
    assert_eq!(writer.name(), "cloud");
}
