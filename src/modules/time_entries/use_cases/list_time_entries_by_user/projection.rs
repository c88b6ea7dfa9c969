use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus};

/// Transport shape of a stored entry: every field of the record, the derived
/// duration, and the version token callers echo back on mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeEntryView {
    pub time_entry_id: String,
    pub user_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_ms: Option<i64>,
    pub is_manual_entry: bool,
    pub created_at: i64,
    pub modified_at: Option<i64>,
    pub sync_status: SyncStatus,
    pub deleted_at: Option<i64>,
    pub conflict_of: Option<String>,
    pub version: i64,
}

impl From<LoadedEntry> for TimeEntryView {
    fn from(loaded: LoadedEntry) -> Self {
        let duration_ms = loaded.entry.duration_millis();
        let entry = loaded.entry;
        Self {
            time_entry_id: entry.time_entry_id,
            user_id: entry.user_id,
            start_time: entry.start_time,
            end_time: entry.end_time,
            duration_ms,
            is_manual_entry: entry.is_manual_entry,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
            sync_status: entry.sync_status,
            deleted_at: entry.deleted_at,
            conflict_of: entry.conflict_of,
            version: loaded.version,
        }
    }
}
