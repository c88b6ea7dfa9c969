use std::sync::Arc;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::create_manual_entry::command::CreateManualEntry;
use crate::modules::time_entries::use_cases::create_manual_entry::decide::decide_create_manual;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::write_path::{EntryWriter, split_primary};

pub struct CreateManualEntryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    writer: Arc<EntryWriter<TStore>>,
}

impl<TStore> CreateManualEntryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(writer: Arc<EntryWriter<TStore>>) -> Self {
        Self { writer }
    }

    pub async fn handle(
        &self,
        command: CreateManualEntry,
    ) -> Result<LoadedEntry, ApplicationError> {
        let user_id = command.user_id.clone();
        let written = self
            .writer
            .execute(&user_id, |entries, now| {
                decide_create_manual(entries, command, now)
            })
            .await?;
        let (created, flagged) = split_primary(written)?;
        if !flagged.is_empty() {
            tracing::warn!(
                %user_id,
                time_entry_id = %created.entry.time_entry_id,
                overlaps = flagged.len(),
                "manual entry overlaps existing entries"
            );
        }
        Ok(created)
    }
}
