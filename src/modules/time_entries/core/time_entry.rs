// Time entry record and its derived views.
//
// Timestamps
// - All i64 values use epoch milliseconds (UTC).
//
// Invariants
// - `end_time >= start_time` whenever `end_time` is set.
// - Duration is always derived from the two timestamps, never stored.
// - `created_at` is written once; `modified_at` is stamped on every later mutation.

use crate::modules::time_entries::core::interval::TimeRange;

/// 9999-12-31T23:59:59.999Z. Entry timestamps stay within `±` this value so
/// spans and durations never overflow.
pub const MAX_TIMESTAMP_MILLIS: i64 = 253_402_300_799_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SyncStatus {
    Pending,
    Synced,
    Conflict,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "Pending",
            SyncStatus::Synced => "Synced",
            SyncStatus::Conflict => "Conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeEntry {
    pub time_entry_id: String,
    pub user_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub is_manual_entry: bool,
    pub created_at: i64,
    pub modified_at: Option<i64>,
    pub sync_status: SyncStatus,
    pub deleted_at: Option<i64>,
    /// Server record this entry diverged from during reconciliation.
    pub conflict_of: Option<String>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Entries that take part in the per-user non-overlap invariant.
    pub fn counts_toward_overlap(&self) -> bool {
        !self.is_deleted() && self.sync_status != SyncStatus::Conflict
    }

    pub fn duration_millis(&self) -> Option<i64> {
        self.end_time.map(|end| end.saturating_sub(self.start_time))
    }

    /// Interval covered by the entry; open entries extend to `now`.
    pub fn span(&self, now: i64) -> TimeRange {
        let end = self.end_time.unwrap_or_else(|| now.max(self.start_time));
        TimeRange::new(self.start_time, end)
    }

    pub fn overlaps(&self, other: &TimeEntry, now: i64) -> bool {
        self.span(now).overlaps(&other.span(now))
    }

    pub fn touch(&mut self, now: i64) {
        self.modified_at = Some(now);
    }
}

/// A stored entry together with its optimistic concurrency token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoadedEntry {
    pub entry: TimeEntry,
    pub version: i64,
}
