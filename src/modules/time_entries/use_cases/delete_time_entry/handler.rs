use std::sync::Arc;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::delete_time_entry::command::DeleteTimeEntry;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::write_path::EntryWriter;

pub struct DeleteTimeEntryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    writer: Arc<EntryWriter<TStore>>,
}

impl<TStore> DeleteTimeEntryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(writer: Arc<EntryWriter<TStore>>) -> Self {
        Self { writer }
    }

    /// Tombstone the entry. Unknown ids yield `Ok(None)` and already deleted
    /// entries are returned as stored, so repeating a delete never fails.
    pub async fn handle(
        &self,
        command: DeleteTimeEntry,
    ) -> Result<Option<LoadedEntry>, ApplicationError> {
        let Some(current) = self.writer.get(&command.time_entry_id).await? else {
            tracing::debug!(time_entry_id = %command.time_entry_id, "delete of unknown entry ignored");
            return Ok(None);
        };
        if current.entry.is_deleted() {
            return Ok(Some(current));
        }

        let deleted = self
            .writer
            .tombstone(
                &current.entry.user_id,
                &command.time_entry_id,
                command.expected_version,
            )
            .await?;
        tracing::debug!(time_entry_id = %command.time_entry_id, "time entry deleted");
        Ok(deleted)
    }
}
