//! Scoped writer example
//!
//! Each simulated request binds its own writer; code below the handler logs
//! through the global functions and the `log` facade without being handed
//! a writer.
//!
//! Run with: cargo run --example scoped_logging

use structured_logger::prelude::*;
use structured_logger::{global, LogBridge};
use std::sync::Arc;
use std::time::Duration;

async fn load_order(order_id: u32) -> u32 {
    global::debug_with(
        "Loading order",
        LogContext::new().with_field("orderId", order_id),
        None,
    );
    tokio::time::sleep(Duration::from_millis(10)).await;
    log::info!(target: "orders::repository", "order {} loaded", order_id);
    order_id * 10
}

async fn handle_request(order_id: u32) {
    let total = load_order(order_id).await;

    scope::spawn(async move {
        global::info_with(
            "Audit entry written",
            LogContext::new().with_field("total", total),
            None,
        );
    })
    .await
    .ok();

    global::notice("Request completed");
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Structured Logger - Scoped Logging Example ===\n");

    LogBridge::init()?;
    scope::set_default_writer(Arc::new(ConsoleWriter::new(Severity::Info)));
    global::info("Outside any request: logs through the default writer");

    let base = CloudWriter::new(Severity::Debug).with_service_context("orders", "2.0.0");

    let requests: Vec<_> = (1..=3)
        .map(|order_id| {
            let writer: SharedWriter = Arc::new(base.with_correlation_id(new_correlation_id()));
            tokio::spawn(scope::scope(writer, handle_request(order_id)))
        })
        .collect();

    for request in requests {
        request.await.ok();
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
