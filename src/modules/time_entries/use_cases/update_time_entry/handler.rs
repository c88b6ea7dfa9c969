use std::sync::Arc;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::decision::DecideError;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::update_time_entry::command::UpdateTimeEntry;
use crate::modules::time_entries::use_cases::update_time_entry::decide::decide_update;
use crate::modules::time_entries::use_cases::write_path::{EntryWriter, split_primary};

pub struct UpdateTimeEntryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    writer: Arc<EntryWriter<TStore>>,
}

impl<TStore> UpdateTimeEntryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(writer: Arc<EntryWriter<TStore>>) -> Self {
        Self { writer }
    }

    pub async fn handle(&self, command: UpdateTimeEntry) -> Result<LoadedEntry, ApplicationError> {
        // The owning user is needed to take the right lock.
        let user_id = match self.writer.get(&command.time_entry_id).await? {
            Some(loaded) if !loaded.entry.is_deleted() => loaded.entry.user_id,
            _ => return Err(DecideError::NotFound(command.time_entry_id).into()),
        };

        let time_entry_id = command.time_entry_id.clone();
        let result = self
            .writer
            .execute(&user_id, |entries, now| decide_update(entries, command, now))
            .await;
        let written = match result {
            Err(e) if e.is_version_conflict() => {
                tracing::warn!(%time_entry_id, error = %e, "update rejected on stale version");
                return Err(e);
            }
            other => other?,
        };
        let (updated, flagged) = split_primary(written)?;
        if !flagged.is_empty() {
            tracing::warn!(%time_entry_id, overlaps = flagged.len(), "updated entry overlaps existing entries");
        }
        Ok(updated)
    }
}
