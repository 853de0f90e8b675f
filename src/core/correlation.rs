//! Correlation id generation

use uuid::Uuid;

/// Fresh correlation id for requests that arrive without one
///
/// A random (v4) UUID in hyphenated lowercase form.
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}
