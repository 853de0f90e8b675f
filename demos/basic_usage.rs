//! Basic writer usage example
//!
//! Demonstrates the console writer, the nine severities and the severity gate.
//!
//! Run with: cargo run --example basic_usage

use structured_logger::prelude::*;
use structured_logger::{info, warning};

fn main() -> Result<()> {
    println!("=== Structured Logger - Basic Usage Example ===\n");

    let writer = ConsoleWriter::new(Severity::Default);

    println!("1. Logging at every severity:");
    writer.default("This record has no assigned severity");
    writer.debug("This is a debug message");
    writer.info("This is an info message");
    writer.notice("This is a notice message");
    writer.warning("This is a warning message");
    writer.error("This is an error message");
    writer.critical("This is a critical message");
    writer.alert("This is an alert message");
    writer.emergency("This is an emergency message");

    println!("\n2. Raising the minimum severity:");
    let writer = writer.with_min_severity(Severity::Info);
    println!("   Minimum severity set to INFO - debug won't show:");
    writer.debug("Debug message (hidden)");
    writer.info("Info message (visible)");

    println!("\n3. Context fields and errors:");
    writer.info_with(
        "Server listening",
        LogContext::new().with_field("port", 8080).with_field("tls", true),
        None,
    );
    let failure = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port 8080 is taken");
    writer.error_with(
        "Failed to bind",
        LogContext::new(),
        Some(&ErrorChain::capture(&failure)),
    );

    println!("\n4. Macros and correlation ids:");
    let writer = writer.with_correlation_id(new_correlation_id());
    info!(writer, "Processing {} items", 100);
    warning!(writer, { "attempt" => 2 }, "Retrying batch {}", 7);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
