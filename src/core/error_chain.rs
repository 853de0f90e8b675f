//! Recursive capture of an error and its causes
//!
//! An [`ErrorChain`] is built eagerly at the call site by walking
//! [`std::error::Error::source`] until the chain ends. The walk stops after
//! [`MAX_ERROR_CHAIN_DEPTH`] elements even if the source chain keeps going.

use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

/// Upper bound on captured chain elements
pub const MAX_ERROR_CHAIN_DEPTH: usize = 32;

/// One error and, recursively, the error that caused it
///
/// Serializes to the error-report shape used by the cloud writer:
/// `exceptionType`, `exceptionMessage`, `stackTrace` and `innerError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorChain {
    #[serde(rename = "exceptionType")]
    pub type_name: String,

    #[serde(rename = "exceptionMessage")]
    pub message: String,

    #[serde(rename = "stackTrace", default, skip_serializing_if = "String::is_empty")]
    pub trace: String,

    #[serde(rename = "innerError", default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorChain>>,
}

impl ErrorChain {
    /// Build a single chain element by hand
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            trace: String::new(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = trace.into();
        self
    }

    /// Attach `cause` below this element
    ///
    /// Elements past [`MAX_ERROR_CHAIN_DEPTH`] are dropped from the root end,
    /// as with a captured chain.
    #[must_use]
    pub fn with_cause(mut self, cause: ErrorChain) -> Self {
        self.cause = Some(Box::new(cause));
        self.truncate(MAX_ERROR_CHAIN_DEPTH);
        self
    }

    fn truncate(&mut self, max_len: usize) {
        let mut link = self;
        for _ in 1..max_len {
            match link.cause.as_deref_mut() {
                Some(next) => link = next,
                None => return,
            }
        }
        link.cause = None;
    }

    /// Capture an error whose concrete type is known
    ///
    /// The outermost element carries the Rust type name and, when backtraces
    /// are enabled, a backtrace taken here.
    pub fn capture<E>(error: &E) -> Self
    where
        E: StdError + 'static,
    {
        let mut chain = Self::from_dyn(error);
        chain.type_name = std::any::type_name::<E>().to_string();
        chain
    }

    /// Capture an error known only as a trait object
    pub fn from_dyn(error: &(dyn StdError + 'static)) -> Self {
        let mut links: Vec<(String, String)> = Vec::new();
        let mut current: Option<&(dyn StdError + 'static)> = Some(error);

        while let Some(err) = current {
            if links.len() == MAX_ERROR_CHAIN_DEPTH {
                break;
            }
            links.push((debug_type_name(err), err.to_string()));
            current = err.source();
        }

        let mut chain: Option<ErrorChain> = None;
        for (type_name, message) in links.into_iter().rev() {
            let mut link = ErrorChain::new(type_name, message);
            link.cause = chain.map(Box::new);
            chain = Some(link);
        }

        let mut chain = chain.unwrap_or_else(|| ErrorChain::new("Error", error.to_string()));
        chain.trace = captured_backtrace();
        chain
    }

    /// Number of elements, the outermost included
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a chain holds at least one element
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of cause hops below the outermost element
    pub fn depth(&self) -> usize {
        self.len() - 1
    }

    /// Iterate from the outermost error to the root cause
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter { next: Some(self) }
    }

    pub fn root_cause(&self) -> &ErrorChain {
        self.iter().last().unwrap_or(self)
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, " (caused by {})", cause)?;
        }
        Ok(())
    }
}

impl<E: StdError + 'static> From<&E> for ErrorChain {
    fn from(error: &E) -> Self {
        ErrorChain::capture(error)
    }
}

pub struct ChainIter<'a> {
    next: Option<&'a ErrorChain>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a ErrorChain;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause.as_deref();
        Some(current)
    }
}

/// Leading identifier of the `Debug` rendering, e.g. `ParseIntError`
fn debug_type_name(error: &dyn StdError) -> String {
    let rendered = format!("{:?}", error);
    let name: String = rendered
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();

    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        "Error".to_string()
    } else {
        name
    }
}

fn captured_backtrace() -> String {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => backtrace.to_string(),
        _ => String::new(),
    }
}
