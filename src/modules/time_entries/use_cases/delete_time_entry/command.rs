// Command data type for tombstoning an entry.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTimeEntry {
    pub time_entry_id: String,
    pub expected_version: i64,
}
