use std::sync::Arc;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::start_tracking::command::StartTracking;
use crate::modules::time_entries::use_cases::start_tracking::decide::decide_start;
use crate::modules::time_entries::use_cases::write_path::{EntryWriter, split_primary};

pub struct StartTrackingHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    writer: Arc<EntryWriter<TStore>>,
}

impl<TStore> StartTrackingHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(writer: Arc<EntryWriter<TStore>>) -> Self {
        Self { writer }
    }

    pub async fn handle(&self, command: StartTracking) -> Result<LoadedEntry, ApplicationError> {
        let user_id = command.user_id.clone();
        let written = self
            .writer
            .execute(&user_id, |entries, now| decide_start(entries, command, now))
            .await?;
        let (started, flagged) = split_primary(written)?;
        if !flagged.is_empty() {
            tracing::warn!(%user_id, overlaps = flagged.len(), "tracking started inside existing entries");
        }
        tracing::debug!(time_entry_id = %started.entry.time_entry_id, "tracking started");
        Ok(started)
    }
}
