//! Resolution of the "current" writer
//!
//! A writer bound with [`scope`] or [`sync_scope`] is visible to everything
//! running inside that scope and to nothing else. Outside any scope,
//! [`current`] falls back to the process-wide default, which starts as a
//! [`DiscardWriter`](crate::writers::DiscardWriter) at `Info`.
//!
//! ```
//! use structured_logger::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let request_writer: SharedWriter =
//!     Arc::new(CloudWriter::new(Severity::Info).with_correlation_id("req-42"));
//!
//! scope::scope(request_writer, async {
//!     // Any code awaited here logs with correlationId=req-42
//!     scope::current().info("handling request");
//! })
//! .await;
//! # }
//! ```

use super::config::LoggerConfig;
use super::error::{LoggerError, Result};
use super::severity::Severity;
use super::writer::SharedWriter;
use crate::writers::DiscardWriter;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

tokio::task_local! {
    static SCOPED_WRITER: SharedWriter;
}

static DEFAULT_WRITER: OnceLock<RwLock<SharedWriter>> = OnceLock::new();

fn default_slot() -> &'static RwLock<SharedWriter> {
    DEFAULT_WRITER.get_or_init(|| RwLock::new(Arc::new(DiscardWriter::new(Severity::Info))))
}

/// The process-wide fallback writer
pub fn default_writer() -> SharedWriter {
    default_slot().read().clone()
}

/// Replace the process-wide fallback writer, returning the previous one
///
/// Scopes that are already running keep their own binding.
pub fn set_default_writer(writer: SharedWriter) -> SharedWriter {
    std::mem::replace(&mut *default_slot().write(), writer)
}

/// Build a writer from `config` and install it as the default
///
/// # Errors
///
/// Returns the configuration error from [`LoggerConfig::build_writer`]; the
/// previous default stays in place.
pub fn init_default_writer(config: &LoggerConfig) -> Result<()> {
    let writer = config.build_writer()?;
    set_default_writer(writer);
    Ok(())
}

/// The writer bound to the running scope, or the default writer
pub fn current() -> SharedWriter {
    SCOPED_WRITER
        .try_with(Arc::clone)
        .unwrap_or_else(|_| default_writer())
}

/// Whether the caller is running inside a [`scope`] or [`sync_scope`]
pub fn is_scoped() -> bool {
    SCOPED_WRITER.try_with(|_| ()).is_ok()
}

/// Serializes tests that swap the process-wide default
#[cfg(test)]
pub(crate) static DEFAULT_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

/// Run `future` with `writer` as the current writer
///
/// Nested scopes shadow the outer binding until they complete.
pub async fn scope<F>(writer: SharedWriter, future: F) -> F::Output
where
    F: Future,
{
    SCOPED_WRITER.scope(writer, future).await
}

/// Like [`scope`], but the override is optional
///
/// # Errors
///
/// Returns `InvalidConfiguration` when `writer` is `None`; `future` is not
/// polled in that case.
pub async fn try_scope<F>(writer: Option<SharedWriter>, future: F) -> Result<F::Output>
where
    F: Future,
{
    let writer = writer.ok_or_else(|| {
        LoggerError::config("scope", "a writer is required to open a logging scope")
    })?;
    Ok(scope(writer, future).await)
}

/// Run the synchronous closure `f` with `writer` as the current writer
pub fn sync_scope<F, R>(writer: SharedWriter, f: F) -> R
where
    F: FnOnce() -> R,
{
    SCOPED_WRITER.sync_scope(writer, f)
}

/// Wrap `future` so it runs inside the caller's scope, if there is one
///
/// Outside any scope the future stays unbound, so it keeps following the
/// process-wide default, including later replacements.
/// Use this to carry the binding into executors other than [`spawn`].
pub fn bind<F>(future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    let bound = SCOPED_WRITER.try_with(Arc::clone).ok();
    async move {
        match bound {
            Some(writer) => SCOPED_WRITER.scope(writer, future).await,
            None => future.await,
        }
    }
}

/// `tokio::spawn` that carries the caller's current writer into the task
///
/// Must be called from within a tokio runtime.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(bind(future))
}
