use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus};
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::sync_time_entries::command::{
    ClientEntry, SyncTimeEntries,
};
use crate::modules::time_entries::use_cases::sync_time_entries::reconcile::{
    reconcile, validate_client,
};
use crate::modules::time_entries::use_cases::write_path::{EntryWriter, split_primary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncOutcome {
    /// Client data is now the server record.
    Applied,
    /// Client data was stored but needs manual resolution, either as a
    /// sibling of a concurrently edited record or because it overlaps.
    Conflicted,
    /// Malformed entry; nothing was written.
    Rejected,
    /// Storage fault or timeout for this entry only.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub outcome: SyncOutcome,
    pub client_entry_id: String,
    pub time_entry_id: Option<String>,
    pub reason: Option<String>,
    pub stored: Option<LoadedEntry>,
    pub server_version: Option<LoadedEntry>,
}

impl SyncResult {
    fn unwritten(outcome: SyncOutcome, client_entry_id: String, reason: String) -> Self {
        Self {
            outcome,
            client_entry_id,
            time_entry_id: None,
            reason: Some(reason),
            stored: None,
            server_version: None,
        }
    }
}

pub struct SyncTimeEntriesHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    writer: Arc<EntryWriter<TStore>>,
}

impl<TStore> SyncTimeEntriesHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(writer: Arc<EntryWriter<TStore>>) -> Self {
        Self { writer }
    }

    /// Reconcile each entry independently. The batch is not atomic: results
    /// come back in submission order and must be inspected one by one.
    pub async fn handle(&self, command: SyncTimeEntries) -> Vec<SyncResult> {
        let mut results = Vec::with_capacity(command.entries.len());
        for client in command.entries {
            results.push(self.sync_one(client).await);
        }
        let failed = results
            .iter()
            .filter(|r| r.outcome == SyncOutcome::Failed)
            .count();
        tracing::info!(entries = results.len(), failed, "sync batch reconciled");
        results
    }

    async fn sync_one(&self, client: ClientEntry) -> SyncResult {
        let client_entry_id = client.time_entry_id.clone();
        if let Err(reason) = validate_client(&client) {
            return SyncResult::unwritten(SyncOutcome::Rejected, client_entry_id, reason.to_string());
        }

        let user_id = client.user_id.clone();
        let base_version = client.base_version;
        let sibling_id = Uuid::now_v7().to_string();
        let writer = &self.writer;
        let result = writer
            .with_user_lock(&user_id, |entries, now| async move {
                let server = writer.get(&client.time_entry_id).await?;
                Ok::<_, ApplicationError>(reconcile(
                    client,
                    server.as_ref(),
                    &entries,
                    sibling_id,
                    now,
                )?)
            })
            .await;

        match result {
            Ok(written) => self.classify(client_entry_id, base_version, written).await,
            Err(ApplicationError::Domain(reason)) => {
                SyncResult::unwritten(SyncOutcome::Rejected, client_entry_id, reason.to_string())
            }
            Err(e) => {
                tracing::warn!(%client_entry_id, error = %e, "sync entry failed");
                SyncResult::unwritten(SyncOutcome::Failed, client_entry_id, e.to_string())
            }
        }
    }

    async fn classify(
        &self,
        client_entry_id: String,
        base_version: Option<i64>,
        written: Vec<LoadedEntry>,
    ) -> SyncResult {
        let (stored, flagged) = match split_primary(written) {
            Ok(split) => split,
            Err(e) => return SyncResult::unwritten(SyncOutcome::Failed, client_entry_id, e.to_string()),
        };

        let mut result = SyncResult {
            outcome: SyncOutcome::Applied,
            client_entry_id,
            time_entry_id: Some(stored.entry.time_entry_id.clone()),
            reason: None,
            stored: None,
            server_version: None,
        };

        if stored.entry.time_entry_id != result.client_entry_id {
            // Sibling: report the server record the client diverged from.
            let server_version = match &stored.entry.conflict_of {
                Some(server_id) => match self.writer.get(server_id).await {
                    Ok(server) => server,
                    Err(e) => {
                        tracing::warn!(
                            client_entry_id = %result.client_entry_id,
                            %server_id,
                            error = %e,
                            "could not load the server record a sibling diverged from"
                        );
                        None
                    }
                },
                None => None,
            };
            let server_at = server_version
                .as_ref()
                .map_or_else(|| "unknown".to_string(), |s| s.version.to_string());
            let based_on = base_version.map_or_else(|| "none".to_string(), |v| v.to_string());
            tracing::warn!(
                client_entry_id = %result.client_entry_id,
                sibling_id = %stored.entry.time_entry_id,
                "concurrent edit stored as sibling"
            );
            result.outcome = SyncOutcome::Conflicted;
            result.reason = Some(format!(
                "concurrent edit: server is at version {server_at}, client based on {based_on}"
            ));
            result.server_version = server_version;
        } else if stored.entry.sync_status == SyncStatus::Conflict {
            result.outcome = SyncOutcome::Conflicted;
            result.reason = Some(match (&stored.entry.conflict_of, flagged.len()) {
                (Some(server_id), 0) => format!("still diverged from {server_id}"),
                (_, overlapping) => format!("overlaps {overlapping} existing entries"),
            });
        }

        result.stored = Some(stored);
        result
    }
}
