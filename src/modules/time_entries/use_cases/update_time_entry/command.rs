// Command data type for editing an existing entry.
//
// Absent patch fields keep their stored value. `expected_version` is the
// version token the caller last observed.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeEntryPatch {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub is_manual_entry: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTimeEntry {
    pub time_entry_id: String,
    pub expected_version: i64,
    pub patch: TimeEntryPatch,
}
