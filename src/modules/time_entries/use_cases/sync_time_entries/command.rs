// Command data types for a sync batch.
//
// `base_version` is the server version the client last saw for this id, or
// `None` for entries created while offline. Ids are client-assigned.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientEntry {
    pub time_entry_id: String,
    pub user_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    #[serde(default)]
    pub is_manual_entry: bool,
    pub created_at: Option<i64>,
    pub modified_at: Option<i64>,
    pub deleted_at: Option<i64>,
    pub base_version: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncTimeEntries {
    pub entries: Vec<ClientEntry>,
}
