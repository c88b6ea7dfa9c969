use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus};
use crate::modules::time_entries::use_cases::decision::{
    DecideError, Decision, accept_checking_overlaps, settle, validate_entry_range, validate_user,
};
use crate::modules::time_entries::use_cases::stop_tracking::command::StopTracking;

pub fn decide_stop(entries: &[LoadedEntry], command: StopTracking, now: i64) -> Decision {
    if let Err(reason) = validate_user(&command.user_id) {
        return Decision::Rejected { reason };
    }
    let Some(open) = entries.iter().find(|loaded| loaded.entry.is_open()) else {
        return Decision::Rejected {
            reason: DecideError::NoOpenEntry(command.user_id),
        };
    };
    if let Err(reason) = validate_entry_range(open.entry.start_time, Some(command.end_time)) {
        return Decision::Rejected { reason };
    }

    let mut entry = open.entry.clone();
    entry.end_time = Some(command.end_time);
    settle(&mut entry, entries, SyncStatus::Pending);
    entry.touch(now);
    let expected_version = command.expected_version.unwrap_or(open.version);
    accept_checking_overlaps(entry, expected_version, entries, now)
}
