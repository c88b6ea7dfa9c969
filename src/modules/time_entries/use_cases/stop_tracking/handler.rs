use std::sync::Arc;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::stop_tracking::command::StopTracking;
use crate::modules::time_entries::use_cases::stop_tracking::decide::decide_stop;
use crate::modules::time_entries::use_cases::write_path::{EntryWriter, split_primary};

pub struct StopTrackingHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    writer: Arc<EntryWriter<TStore>>,
}

impl<TStore> StopTrackingHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(writer: Arc<EntryWriter<TStore>>) -> Self {
        Self { writer }
    }

    pub async fn handle(&self, command: StopTracking) -> Result<LoadedEntry, ApplicationError> {
        let user_id = command.user_id.clone();
        let written = self
            .writer
            .execute(&user_id, |entries, now| decide_stop(entries, command, now))
            .await?;
        let (stopped, _) = split_primary(written)?;
        tracing::debug!(
            time_entry_id = %stopped.entry.time_entry_id,
            duration_ms = stopped.entry.duration_millis(),
            "tracking stopped"
        );
        Ok(stopped)
    }
}
