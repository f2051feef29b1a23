//! Grouping of heartbeat records by service identity.

use std::collections::BTreeMap;

use super::record::HeartbeatRecord;

/// Partition records by service identifier.
///
/// Every input record lands in exactly one group; nothing is dropped or
/// duplicated. Identifiers are compared by exact (already-trimmed) string
/// value with no case folding. The order of records within a group is
/// whatever the input produced - the detector re-sorts before scanning.
pub fn group_by_service(
    records: impl IntoIterator<Item = HeartbeatRecord>,
) -> BTreeMap<String, Vec<HeartbeatRecord>> {
    let mut groups: BTreeMap<String, Vec<HeartbeatRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.service.clone()).or_default().push(record);
    }
    groups
}
