// Command data type for starting a tracked (non manual) time entry.
//
// The inbound adapter assigns `time_entry_id` before handing the command over.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTracking {
    pub time_entry_id: String,
    pub user_id: String,
    pub start_time: i64,
}
