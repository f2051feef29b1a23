//! Input side: reading raw heartbeat batches and validating their entries.
//!
//! The core never touches raw input. Everything that can be malformed is
//! handled here, in two thin steps:
//!
//! - [`file`]: load the batch text (file or stdin) and split it into raw
//!   JSON entries
//! - [`validate`]: classify each entry as a [`HeartbeatRecord`] or an
//!   [`InvalidReason`], tallying [`ValidationStats`]
//!
//! [`HeartbeatRecord`]: crate::data::HeartbeatRecord

pub mod file;
pub mod validate;

pub use file::{parse_entries, read_entries, read_input};
pub use validate::{
    validate_entries, validate_entry, InvalidReason, ParseOutcome, ValidationStats,
};
