use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus, TimeEntry};
use crate::modules::time_entries::use_cases::decision::{
    DecideError, Decision, accept_checking_overlaps, validate_entry_range, validate_user,
};
use crate::modules::time_entries::use_cases::start_tracking::command::StartTracking;

pub fn decide_start(entries: &[LoadedEntry], command: StartTracking, now: i64) -> Decision {
    if let Err(reason) = validate_user(&command.user_id)
        .and_then(|_| validate_entry_range(command.start_time, None))
    {
        return Decision::Rejected { reason };
    }
    if entries.iter().any(|loaded| loaded.entry.is_open()) {
        return Decision::Rejected {
            reason: DecideError::AlreadyTracking(command.user_id),
        };
    }

    let entry = TimeEntry {
        time_entry_id: command.time_entry_id,
        user_id: command.user_id,
        start_time: command.start_time,
        end_time: None,
        is_manual_entry: false,
        created_at: now,
        modified_at: None,
        sync_status: SyncStatus::Pending,
        deleted_at: None,
        conflict_of: None,
    };
    accept_checking_overlaps(entry, 0, entries, now)
}
