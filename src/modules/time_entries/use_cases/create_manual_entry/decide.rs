use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus, TimeEntry};
use crate::modules::time_entries::use_cases::create_manual_entry::command::CreateManualEntry;
use crate::modules::time_entries::use_cases::decision::{
    Decision, accept_checking_overlaps, validate_entry_range, validate_user,
};

pub fn decide_create_manual(
    entries: &[LoadedEntry],
    command: CreateManualEntry,
    now: i64,
) -> Decision {
    if let Err(reason) = validate_user(&command.user_id)
        .and_then(|_| validate_entry_range(command.start_time, Some(command.end_time)))
    {
        return Decision::Rejected { reason };
    }

    let entry = TimeEntry {
        time_entry_id: command.time_entry_id,
        user_id: command.user_id,
        start_time: command.start_time,
        end_time: Some(command.end_time),
        is_manual_entry: true,
        created_at: now,
        modified_at: None,
        sync_status: SyncStatus::Pending,
        deleted_at: None,
        conflict_of: None,
    };
    accept_checking_overlaps(entry, 0, entries, now)
}
