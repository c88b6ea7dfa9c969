use crate::modules::time_entries::core::time_entry::{
    LoadedEntry, MAX_TIMESTAMP_MILLIS, SyncStatus, TimeEntry,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("user id is required")]
    MissingUserId,

    #[error("end time {end_time} is before start time {start_time}")]
    InvalidRange { start_time: i64, end_time: i64 },

    #[error("timestamp {0} is outside the supported range")]
    TimestampOutOfRange(i64),

    #[error("target hours {0} must be a non-negative number")]
    InvalidTargetHours(String),

    #[error("week {year}-W{week} is not a valid iso week")]
    InvalidWeek { year: i32, week: u32 },

    #[error("user {0} is already tracking time")]
    AlreadyTracking(String),

    #[error("user {0} has no open time entry")]
    NoOpenEntry(String),

    #[error("time entry {0} not found")]
    NotFound(String),

    #[error("time entry {0} belongs to another user")]
    OwnedByAnotherUser(String),
}

impl DecideError {
    /// Malformed input, as opposed to a rejection caused by current state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DecideError::MissingUserId
                | DecideError::InvalidRange { .. }
                | DecideError::TimestampOutOfRange(_)
                | DecideError::InvalidTargetHours(_)
                | DecideError::InvalidWeek { .. }
                | DecideError::OwnedByAnotherUser(_)
        )
    }
}

/// One record to persist, guarded by the version the decision was based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWrite {
    pub entry: TimeEntry,
    pub expected_version: i64,
}

/// Outcome of a decide function. The first write of an accepted decision is
/// always the entry the command was about.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted { writes: Vec<EntryWrite> },
    Rejected { reason: DecideError },
}

pub fn validate_user(user_id: &str) -> Result<(), DecideError> {
    if user_id.trim().is_empty() {
        return Err(DecideError::MissingUserId);
    }
    Ok(())
}

pub fn validate_range(start_time: i64, end_time: Option<i64>) -> Result<(), DecideError> {
    match end_time {
        Some(end_time) if end_time < start_time => Err(DecideError::InvalidRange {
            start_time,
            end_time,
        }),
        _ => Ok(()),
    }
}

/// Range check for timestamps that end up on a stored entry.
pub fn validate_entry_range(start_time: i64, end_time: Option<i64>) -> Result<(), DecideError> {
    for timestamp in std::iter::once(start_time).chain(end_time) {
        if !(-MAX_TIMESTAMP_MILLIS..=MAX_TIMESTAMP_MILLIS).contains(&timestamp) {
            return Err(DecideError::TimestampOutOfRange(timestamp));
        }
    }
    validate_range(start_time, end_time)
}

/// Reset an edited entry before overlaps are re-checked. A sync sibling stays
/// in `Conflict` while the record it diverged from is live; once that record
/// is gone the link is dropped and the entry settles to `resting`.
pub fn settle(entry: &mut TimeEntry, live: &[LoadedEntry], resting: SyncStatus) {
    let diverged_from_live = entry.conflict_of.as_deref().is_some_and(|server_id| {
        live.iter()
            .any(|other| other.entry.time_entry_id == server_id && !other.entry.is_deleted())
    });
    if diverged_from_live {
        entry.sync_status = SyncStatus::Conflict;
    } else {
        entry.conflict_of = None;
        entry.sync_status = resting;
    }
}

/// Accept `candidate`, marking it `Conflict` when it overlaps any live entry.
/// Overlapped entries not yet in `Conflict` are flagged alongside it. Overlaps
/// are surfaced rather than rejected because manual corrections routinely
/// collide with tracked time.
pub fn accept_checking_overlaps(
    mut candidate: TimeEntry,
    expected_version: i64,
    existing: &[LoadedEntry],
    now: i64,
) -> Decision {
    let overlapping: Vec<&LoadedEntry> = if candidate.is_deleted() {
        Vec::new()
    } else {
        existing
            .iter()
            .filter(|other| other.entry.time_entry_id != candidate.time_entry_id)
            .filter(|other| !other.entry.is_deleted())
            .filter(|other| other.entry.overlaps(&candidate, now))
            .collect()
    };

    if !overlapping.is_empty() {
        candidate.sync_status = SyncStatus::Conflict;
    }

    let mut writes = vec![EntryWrite {
        entry: candidate,
        expected_version,
    }];
    for clash in overlapping
        .into_iter()
        .filter(|other| other.entry.counts_toward_overlap())
    {
        let mut flagged = clash.entry.clone();
        flagged.sync_status = SyncStatus::Conflict;
        flagged.touch(now);
        writes.push(EntryWrite {
            entry: flagged,
            expected_version: clash.version,
        });
    }
    Decision::Accepted { writes }
}
