//! Validation of raw entries into heartbeat records.
//!
//! Each raw entry is classified exactly once: either it becomes a
//! [`HeartbeatRecord`] or it is dropped with an [`InvalidReason`]. The
//! detection core downstream never sees an invalid entry and never has to
//! re-check shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::data::HeartbeatRecord;

/// Why a raw entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// Not a JSON object, or a required field is missing.
    #[error("entry is not an object with service and timestamp fields")]
    MalformedShape,
    /// `service` is not text, or is empty after trimming.
    #[error("service is not text or is empty after trimming")]
    InvalidService,
    /// `timestamp` is not text, or does not parse as a UTC instant.
    #[error("timestamp is not text or is not a valid instant")]
    InvalidTimestamp,
}

/// Outcome of validating one raw entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Valid(HeartbeatRecord),
    Invalid(InvalidReason),
}

/// Classify a single raw entry.
///
/// A valid entry is a JSON object with a string `service` that is non-empty
/// after trimming and a string `timestamp` that parses as an RFC 3339
/// instant. The service identifier is stored trimmed; the timestamp is
/// normalized to UTC.
pub fn validate_entry(entry: &Value) -> ParseOutcome {
    let Some(fields) = entry.as_object() else {
        return ParseOutcome::Invalid(InvalidReason::MalformedShape);
    };
    let (Some(service_field), Some(timestamp_field)) =
        (fields.get("service"), fields.get("timestamp"))
    else {
        return ParseOutcome::Invalid(InvalidReason::MalformedShape);
    };

    let service = match service_field.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return ParseOutcome::Invalid(InvalidReason::InvalidService),
    };

    let Some(timestamp_text) = timestamp_field.as_str() else {
        return ParseOutcome::Invalid(InvalidReason::InvalidTimestamp);
    };
    match DateTime::parse_from_rfc3339(timestamp_text.trim()) {
        Ok(instant) => ParseOutcome::Valid(HeartbeatRecord::new(
            service,
            instant.with_timezone(&Utc),
        )),
        Err(_) => ParseOutcome::Invalid(InvalidReason::InvalidTimestamp),
    }
}

/// Aggregate counts for one validation pass.
///
/// Invalid entries are surfaced only through these counters, never as
/// per-entry errors, and never stop the rest of the batch from processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub malformed_shape: usize,
    pub invalid_service: usize,
    pub invalid_timestamp: usize,
}

impl ValidationStats {
    fn record_invalid(&mut self, reason: InvalidReason) {
        self.invalid += 1;
        match reason {
            InvalidReason::MalformedShape => self.malformed_shape += 1,
            InvalidReason::InvalidService => self.invalid_service += 1,
            InvalidReason::InvalidTimestamp => self.invalid_timestamp += 1,
        }
    }
}

/// Validate a whole batch, keeping the good records and tallying the rest.
pub fn validate_entries(entries: &[Value]) -> (Vec<HeartbeatRecord>, ValidationStats) {
    let mut records = Vec::with_capacity(entries.len());
    let mut stats = ValidationStats {
        total: entries.len(),
        ..ValidationStats::default()
    };

    for entry in entries {
        match validate_entry(entry) {
            ParseOutcome::Valid(record) => {
                stats.valid += 1;
                records.push(record);
            }
            ParseOutcome::Invalid(reason) => stats.record_invalid(reason),
        }
    }

    (records, stats)
}
