//! Bridges from other logging front ends into the current writer

pub mod log_bridge;

pub use log_bridge::{normalize_key, LogBridge, CATEGORY_NAME_KEY, MESSAGE_TEMPLATE_KEY};
