//! Core value types for heartbeat gap detection.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A single validated heartbeat: a named service reported liveness at an instant.
///
/// Records are only constructed by successful validation, so the service
/// identifier is always non-empty and already trimmed, and the timestamp is a
/// valid UTC instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatRecord {
    /// Service identifier, non-empty and trimmed.
    pub service: String,
    /// Instant the heartbeat was reported, UTC-normalized.
    pub timestamp: DateTime<Utc>,
}

impl HeartbeatRecord {
    pub fn new(service: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            timestamp,
        }
    }
}

/// A detected heartbeat gap: the named service first missed a beat at `alert_at`.
///
/// `alert_at` is the expected time of the *first* missed beat (the earlier
/// record of the qualifying pair plus one expected interval), not the end of
/// the gap. At most one alert is produced per service per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub service: String,
    #[serde(serialize_with = "serialize_instant_millis")]
    pub alert_at: DateTime<Utc>,
}

impl Alert {
    /// The alert instant as RFC 3339 text with millisecond precision and a
    /// `Z` designator, e.g. `2025-01-01T10:03:00.000Z`.
    pub fn alert_at_text(&self) -> String {
        format_instant(self.alert_at)
    }
}

/// Format an instant as RFC 3339 with millisecond precision and `Z`.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_instant_millis<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_instant(*instant))
}
