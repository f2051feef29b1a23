//! Gap detection over per-service heartbeat timelines.
//!
//! A gap is the elapsed time between two chronologically consecutive
//! heartbeats from the same service. A gap of at least
//! `interval_secs * (allowed_misses + 1)` seconds implies that at least
//! `allowed_misses` expected beats were skipped, which raises an alert for
//! the expected time of the first missed beat.

use chrono::Duration;
use tracing::debug;

use crate::config::MonitorConfig;

use super::group::group_by_service;
use super::record::{Alert, HeartbeatRecord};

/// Scan one service's records for a threshold-exceeding gap.
///
/// Records must all belong to the same service. Fewer than two records can
/// never establish a gap, so they produce no alert. Otherwise the records are
/// sorted by timestamp and consecutive pairs are scanned in order; the first
/// pair whose gap reaches the threshold (inclusive) yields the alert, and
/// scanning stops there. Equal timestamps form a zero gap and never trigger,
/// regardless of their relative order after sorting.
///
/// This operation is infallible: "no gap found" is the `None` result.
pub fn detect(mut records: Vec<HeartbeatRecord>, config: &MonitorConfig) -> Option<Alert> {
    if records.len() < 2 {
        return None;
    }

    records.sort_by_key(|r| r.timestamp);

    let threshold = Duration::seconds(config.threshold_secs() as i64);
    let interval = Duration::seconds(config.interval_secs as i64);

    for pair in records.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let gap = next.timestamp - current.timestamp;
        if gap >= threshold {
            // Alert at the expected time of the first missed beat, not the
            // end of the gap.
            let alert_at = current.timestamp + interval;
            debug!(
                service = %current.service,
                gap_secs = gap.num_seconds(),
                "gap at or above threshold"
            );
            return Some(Alert {
                service: current.service.clone(),
                alert_at,
            });
        }
    }

    None
}

/// Run gap detection across a whole batch of validated records.
///
/// Records are grouped by service and each group is scanned independently
/// with [`detect`]; at most one alert is emitted per service. Alerts come
/// back ordered by service name as a side effect of grouping, but callers
/// must not rely on any particular order.
pub fn detect_all(records: Vec<HeartbeatRecord>, config: &MonitorConfig) -> Vec<Alert> {
    group_by_service(records)
        .into_values()
        .filter_map(|group| detect(group, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeSet;

    fn beat(service: &str, ts: &str) -> HeartbeatRecord {
        let timestamp: DateTime<Utc> = ts.parse().unwrap();
        HeartbeatRecord::new(service, timestamp)
    }

    fn config(interval_secs: u64, allowed_misses: u32) -> MonitorConfig {
        MonitorConfig {
            interval_secs,
            allowed_misses,
        }
    }

    #[test]
    fn test_four_beats_with_qualifying_gap() {
        // 10:02 -> 10:06 is 240s, exactly interval * (misses + 1).
        let records = vec![
            beat("email", "2025-01-01T10:00:00Z"),
            beat("email", "2025-01-01T10:01:00Z"),
            beat("email", "2025-01-01T10:02:00Z"),
            beat("email", "2025-01-01T10:06:00Z"),
        ];

        let alert = detect(records, &config(60, 3)).unwrap();
        assert_eq!(alert.service, "email");
        assert_eq!(alert.alert_at_text(), "2025-01-01T10:03:00.000Z");
    }

    #[test]
    fn test_gap_below_threshold_is_quiet() {
        // 180s gap against a 240s threshold.
        let records = vec![
            beat("sms", "2025-01-01T10:00:00Z"),
            beat("sms", "2025-01-01T10:03:00Z"),
        ];

        assert!(detect(records, &config(60, 3)).is_none());
    }

    #[test]
    fn test_gap_exactly_at_threshold_triggers() {
        let records = vec![
            beat("push", "2025-01-01T10:00:00Z"),
            beat("push", "2025-01-01T10:04:00Z"),
        ];

        let alert = detect(records, &config(60, 3)).unwrap();
        assert_eq!(alert.alert_at_text(), "2025-01-01T10:01:00.000Z");
    }

    #[test]
    fn test_gap_one_second_below_threshold_is_quiet() {
        let records = vec![
            beat("push", "2025-01-01T10:00:00Z"),
            beat("push", "2025-01-01T10:03:59Z"),
        ];

        assert!(detect(records, &config(60, 3)).is_none());
    }

    #[test]
    fn test_fewer_than_two_records_never_alert() {
        assert!(detect(Vec::new(), &config(60, 0)).is_none());
        assert!(detect(vec![beat("solo", "2025-01-01T10:00:00Z")], &config(60, 0)).is_none());
    }

    #[test]
    fn test_multi_interval_gap_reports_first_missed_beat() {
        // An hour-long gap still alerts one interval after the last beat seen.
        let records = vec![
            beat("batch", "2025-01-01T10:00:00Z"),
            beat("batch", "2025-01-01T11:00:00Z"),
        ];

        let alert = detect(records, &config(60, 3)).unwrap();
        assert_eq!(alert.alert_at_text(), "2025-01-01T10:01:00.000Z");
    }

    #[test]
    fn test_only_first_chronological_gap_reported() {
        let records = vec![
            beat("email", "2025-01-01T10:00:00Z"),
            beat("email", "2025-01-01T10:10:00Z"),
            beat("email", "2025-01-01T10:30:00Z"),
        ];

        let alert = detect(records, &config(60, 3)).unwrap();
        assert_eq!(alert.alert_at_text(), "2025-01-01T10:01:00.000Z");
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_scanning() {
        let records = vec![
            beat("email", "2025-01-01T10:06:00Z"),
            beat("email", "2025-01-01T10:01:00Z"),
            beat("email", "2025-01-01T10:00:00Z"),
            beat("email", "2025-01-01T10:02:00Z"),
        ];

        let alert = detect(records, &config(60, 3)).unwrap();
        assert_eq!(alert.alert_at_text(), "2025-01-01T10:03:00.000Z");
    }

    #[test]
    fn test_duplicate_timestamps_form_zero_gap() {
        let records = vec![
            beat("dup", "2025-01-01T10:00:00Z"),
            beat("dup", "2025-01-01T10:00:00Z"),
            beat("dup", "2025-01-01T10:01:00Z"),
        ];

        assert!(detect(records, &config(60, 0)).is_none());
    }

    #[test]
    fn test_zero_allowed_misses_alerts_on_one_interval_gap() {
        let records = vec![
            beat("strict", "2025-01-01T10:00:00Z"),
            beat("strict", "2025-01-01T10:01:00Z"),
            beat("strict", "2025-01-01T10:03:00Z"),
        ];

        let alert = detect(records, &config(60, 0)).unwrap();
        assert_eq!(alert.alert_at_text(), "2025-01-01T10:02:00.000Z");
    }

    #[test]
    fn test_sub_second_offsets_do_not_round_into_threshold() {
        // 239.5s is below a 240s threshold even though it rounds up.
        let records = vec![
            beat("precise", "2025-01-01T10:00:00.500Z"),
            beat("precise", "2025-01-01T10:04:00.000Z"),
        ];

        assert!(detect(records, &config(60, 3)).is_none());
    }

    #[test]
    fn test_detect_all_multi_service_selectivity() {
        let records = vec![
            beat("email", "2025-01-01T10:00:00Z"),
            beat("email", "2025-01-01T10:10:00Z"),
            beat("sms", "2025-01-01T10:00:00Z"),
            beat("sms", "2025-01-01T10:01:00Z"),
        ];

        let alerts = detect_all(records, &config(60, 3));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].service, "email");
    }

    #[test]
    fn test_detect_all_at_most_one_alert_per_service() {
        let records = vec![
            beat("email", "2025-01-01T10:00:00Z"),
            beat("email", "2025-01-01T10:10:00Z"),
            beat("email", "2025-01-01T10:30:00Z"),
            beat("email", "2025-01-01T11:30:00Z"),
        ];

        let alerts = detect_all(records, &config(60, 3));
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_detect_all_empty_input() {
        assert!(detect_all(Vec::new(), &config(60, 3)).is_empty());
    }

    #[test]
    fn test_detect_all_invariant_under_permutation() {
        let records = vec![
            beat("email", "2025-01-01T10:00:00Z"),
            beat("sms", "2025-01-01T10:00:00Z"),
            beat("email", "2025-01-01T10:06:00Z"),
            beat("sms", "2025-01-01T10:02:00Z"),
            beat("email", "2025-01-01T10:07:00Z"),
            beat("sms", "2025-01-01T10:09:00Z"),
        ];

        let as_set = |alerts: Vec<Alert>| -> BTreeSet<(String, String)> {
            alerts
                .into_iter()
                .map(|a| (a.service.clone(), a.alert_at_text()))
                .collect()
        };

        let baseline = as_set(detect_all(records.clone(), &config(60, 3)));
        assert!(!baseline.is_empty());

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(as_set(detect_all(reversed, &config(60, 3))), baseline);

        let mut rotated = records;
        rotated.rotate_left(3);
        assert_eq!(as_set(detect_all(rotated, &config(60, 3))), baseline);
    }
}
