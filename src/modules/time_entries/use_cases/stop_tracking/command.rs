// Command data type for closing the user's open time entry.
//
// `expected_version` is optional: callers that echo the version they last saw
// get a version conflict instead of closing an entry that changed underneath them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTracking {
    pub user_id: String,
    pub end_time: i64,
    pub expected_version: Option<i64>,
}
