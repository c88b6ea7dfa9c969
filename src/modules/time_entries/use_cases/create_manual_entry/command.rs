// Command data type for recording a closed entry by hand.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateManualEntry {
    pub time_entry_id: String,
    pub user_id: String,
    pub start_time: i64,
    pub end_time: i64,
}
