//! # heartwatch
//!
//! Batch heartbeat gap detection: ingest a batch of service heartbeat
//! events, drop malformed entries, and flag services whose heartbeats show a
//! gap large enough to imply a configured number of consecutive missed
//! beats.
//!
//! ## Architecture
//!
//! ```text
//! raw JSON batch (file / stdin)
//!        |
//!        v
//!   source::file        split into raw entries
//!        |
//!        v
//!   source::validate    ParseOutcome: Valid(record) | Invalid(reason)
//!        |                      invalid entries tallied, never forwarded
//!        v
//!   data::group         one group per service identifier
//!        |
//!        v
//!   data::gap           sorted pairwise scan, first qualifying gap wins
//!        |
//!        v
//!   report              "Found N alert(s)" text or structured JSON
//! ```
//!
//! The core (`data`) is pure and infallible: it consumes validated records
//! and a [`MonitorConfig`], and returns alerts. All I/O, validation, and
//! rendering live at the edges.
//!
//! ## Usage
//!
//! ```
//! use heartwatch::{detect_all, validate_entries, MonitorConfig};
//! use serde_json::json;
//!
//! let entries = vec![
//!     json!({ "service": "email", "timestamp": "2025-01-01T10:00:00Z" }),
//!     json!({ "service": "email", "timestamp": "2025-01-01T10:06:00Z" }),
//! ];
//!
//! let (records, stats) = validate_entries(&entries);
//! assert_eq!(stats.valid, 2);
//!
//! let config = MonitorConfig { interval_secs: 60, allowed_misses: 3 };
//! let alerts = detect_all(records, &config);
//! assert_eq!(alerts[0].alert_at_text(), "2025-01-01T10:01:00.000Z");
//! ```

pub mod config;
pub mod data;
pub mod report;
pub mod source;

pub use config::MonitorConfig;
pub use data::{detect, detect_all, group_by_service, Alert, HeartbeatRecord};
pub use report::RunReport;
pub use source::{
    read_entries, validate_entries, InvalidReason, ParseOutcome, ValidationStats,
};
