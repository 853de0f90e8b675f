//! Writer implementations

pub mod cloud;
pub mod console;
pub mod discard;
pub mod fan_out;
pub mod mute;

pub use cloud::{CloudWriter, ERROR_REPORT_TYPE, LABELS_KEY};
pub use console::ConsoleWriter;
pub use discard::DiscardWriter;
pub use fan_out::FanOutWriter;
pub use mute::{MutePredicate, MuteWriter, MuteWriterBuilder};
