//! The detection core: records, grouping, and gap scanning.
//!
//! This module is pure and synchronous - it consumes validated records plus a
//! [`MonitorConfig`](crate::config::MonitorConfig) and returns data, with no
//! I/O and no shared mutable state.
//!
//! ## Data flow
//!
//! ```text
//! Vec<HeartbeatRecord> (validated upstream)
//!        |
//!        v
//! group::group_by_service()     one group per service identifier
//!        |
//!        v
//! gap::detect() per group       sort, scan consecutive pairs, first
//!        |                      threshold-reaching gap wins
//!        v
//! Vec<Alert>                    at most one per service
//! ```

pub mod gap;
pub mod group;
pub mod record;

pub use gap::{detect, detect_all};
pub use group::group_by_service;
pub use record::{format_instant, Alert, HeartbeatRecord};
