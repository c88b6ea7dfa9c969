// Per-entry reconciliation of a client submission against the server record.
//
// - no server record: insert the client entry as `Synced`
// - same user and `base_version` equals the stored version: apply the client
//   fields over the server record as `Synced` (a sibling whose server record
//   is still live stays `Conflict`)
// - otherwise: keep the server record and store the client data as a new
//   `Conflict` sibling pointing at it
//
// Inserts and applied updates go through the overlap check, so newly
// overlapping pairs end up in `Conflict` as well. Siblings already are.

use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus, TimeEntry};
use crate::modules::time_entries::use_cases::decision::{
    DecideError, Decision, EntryWrite, accept_checking_overlaps, settle, validate_entry_range,
    validate_user,
};
use crate::modules::time_entries::use_cases::sync_time_entries::command::ClientEntry;

pub fn validate_client(client: &ClientEntry) -> Result<(), DecideError> {
    validate_user(&client.user_id)?;
    validate_entry_range(client.start_time, client.end_time)
}

/// Writes for one client entry. The first write is the record the client's
/// data landed in: the inserted or updated entry, or the new sibling.
pub fn reconcile(
    client: ClientEntry,
    server: Option<&LoadedEntry>,
    entries: &[LoadedEntry],
    sibling_id: String,
    now: i64,
) -> Result<Vec<EntryWrite>, DecideError> {
    validate_client(&client)?;

    let decision = match server {
        None => {
            let entry = TimeEntry {
                time_entry_id: client.time_entry_id,
                user_id: client.user_id,
                start_time: client.start_time,
                end_time: client.end_time,
                is_manual_entry: client.is_manual_entry,
                created_at: client.created_at.unwrap_or(now),
                modified_at: client.modified_at,
                sync_status: SyncStatus::Synced,
                deleted_at: client.deleted_at,
                conflict_of: None,
            };
            accept_checking_overlaps(entry, 0, entries, now)
        }
        Some(server) if server.entry.user_id != client.user_id => {
            return Err(DecideError::OwnedByAnotherUser(client.time_entry_id));
        }
        Some(server) if client.base_version == Some(server.version) => {
            let mut entry = server.entry.clone();
            entry.start_time = client.start_time;
            entry.end_time = client.end_time;
            entry.is_manual_entry = client.is_manual_entry;
            entry.deleted_at = client.deleted_at;
            settle(&mut entry, entries, SyncStatus::Synced);
            entry.touch(now);
            accept_checking_overlaps(entry, server.version, entries, now)
        }
        Some(server) => {
            let sibling = TimeEntry {
                time_entry_id: sibling_id,
                user_id: client.user_id,
                start_time: client.start_time,
                end_time: client.end_time,
                is_manual_entry: client.is_manual_entry,
                created_at: now,
                modified_at: None,
                sync_status: SyncStatus::Conflict,
                deleted_at: client.deleted_at,
                conflict_of: Some(server.entry.time_entry_id.clone()),
            };
            Decision::Accepted {
                writes: vec![EntryWrite {
                    entry: sibling,
                    expected_version: 0,
                }],
            }
        }
    };

    match decision {
        Decision::Accepted { writes } => Ok(writes),
        Decision::Rejected { reason } => Err(reason),
    }
}
