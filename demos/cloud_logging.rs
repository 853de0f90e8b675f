//! Cloud JSON output example
//!
//! Builds a cloud writer from configuration, derives a per-request writer
//! and logs an error chain.
//!
//! Run with: cargo run --example cloud_logging

use structured_logger::prelude::*;
use structured_logger::writers::mute;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Structured Logger - Cloud Logging Example ===\n");

    let config = LoggerConfig::from_env()?
        .with_format(structured_logger::WriterKind::Cloud)
        .with_service("checkout", "1.4.2")
        .with_label("region", "eu-west1");
    scope::init_default_writer(&config)?;

    let base = CloudWriter::new(Severity::Debug)
        .with_service_context("checkout", "1.4.2")
        .with_label("region", "eu-west1");

    println!("1. Plain record:");
    base.info("Service started");

    println!("\n2. Per-request writer:");
    let request = HttpRequestSnapshot::new("POST", "https://shop.example.com/checkout")
        .with_content_size(512)
        .with_user_agent("curl/8.5.0")
        .with_remote_ip("203.0.113.7")
        .with_protocol("HTTP/1.1");
    let request_writer = base.for_request(request, new_correlation_id());
    request_writer.notice_with(
        "Checkout started",
        LogContext::new().with_field("cartItems", 3),
        None,
    );

    println!("\n3. Error chain:");
    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "payment gateway timed out");
    request_writer.error_with(
        "Charge failed",
        LogContext::new().with_field("orderId", 1187),
        Some(&ErrorChain::capture(&failure)),
    );

    println!("\n4. Fan-out and muting:");
    let console: SharedWriter = Arc::new(ConsoleWriter::new(Severity::Info));
    let cloud: SharedWriter = Arc::new(base.with_pretty_print());
    let both: SharedWriter = Arc::new(FanOutWriter::new(Severity::Info, vec![console, cloud])?);
    let writer = mute::when(|record| record.message.starts_with("GET /health")).otherwise(both);
    writer.info("GET /health 200 (muted)");
    writer.info("GET /orders 200");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
