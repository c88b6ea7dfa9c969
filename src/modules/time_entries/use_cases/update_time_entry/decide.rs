use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus};
use crate::modules::time_entries::use_cases::decision::{
    DecideError, Decision, accept_checking_overlaps, settle, validate_entry_range,
};
use crate::modules::time_entries::use_cases::update_time_entry::command::UpdateTimeEntry;

/// The stored version is not compared here; the store rejects the write when
/// `expected_version` is stale, leaving the entry untouched.
pub fn decide_update(entries: &[LoadedEntry], command: UpdateTimeEntry, now: i64) -> Decision {
    let Some(current) = entries
        .iter()
        .find(|loaded| loaded.entry.time_entry_id == command.time_entry_id)
    else {
        return Decision::Rejected {
            reason: DecideError::NotFound(command.time_entry_id),
        };
    };

    let mut entry = current.entry.clone();
    let patch = command.patch;
    if let Some(start_time) = patch.start_time {
        entry.start_time = start_time;
    }
    if let Some(end_time) = patch.end_time {
        entry.end_time = Some(end_time);
    }
    if let Some(is_manual_entry) = patch.is_manual_entry {
        entry.is_manual_entry = is_manual_entry;
    }
    if let Err(reason) = validate_entry_range(entry.start_time, entry.end_time) {
        return Decision::Rejected { reason };
    }

    settle(&mut entry, entries, SyncStatus::Pending);
    entry.touch(now);
    accept_checking_overlaps(entry, command.expected_version, entries, now)
}
