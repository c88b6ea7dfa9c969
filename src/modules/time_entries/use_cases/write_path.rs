// Shared write path for every mutating use case.
//
// Responsibilities
// - Serialize mutations per user so overlap checks and version checks see a
//   stable snapshot of that user's entries.
// - Load the snapshot, run the decider with the current time, and persist the
//   accepted writes in order.
// - Bound every lock acquisition and store call by the configured timeout.
//
// Each write is atomic on its own. The primary entry is written first, so a
// stale version aborts the decision before any sibling entry is flagged.

use std::sync::Arc;
use std::time::Duration;

use crate::modules::time_entries::adapters::outbound::entry_store::{StoreError, TimeEntryStore};
use crate::modules::time_entries::core::interval::TimeRange;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::decision::{Decision, EntryWrite};
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::keyed_locks::KeyedLocks;
use crate::shared::infrastructure::timeout::with_timeout;

pub struct EntryWriter<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    store: Arc<TStore>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks,
    timeout: Duration,
}

impl<TStore> EntryWriter<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(store: Arc<TStore>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            store,
            clock,
            locks: KeyedLocks::new(),
            timeout,
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get(&self, time_entry_id: &str) -> Result<Option<LoadedEntry>, ApplicationError> {
        Ok(with_timeout(self.timeout, self.store.get(time_entry_id)).await??)
    }

    /// Live entries of `user_id` across all time.
    pub async fn user_entries(&self, user_id: &str) -> Result<Vec<LoadedEntry>, ApplicationError> {
        Ok(with_timeout(
            self.timeout,
            self.store.list_by_user(user_id, TimeRange::unbounded(), false),
        )
        .await??)
    }

    /// Run `decide` against a consistent snapshot of `user_id`'s entries and
    /// persist what it accepts. Returns the written records with their new
    /// versions, in decision order.
    pub async fn execute<F>(
        &self,
        user_id: &str,
        decide: F,
    ) -> Result<Vec<LoadedEntry>, ApplicationError>
    where
        F: FnOnce(&[LoadedEntry], i64) -> Decision,
    {
        self.with_user_lock(user_id, |entries, now| async move {
            match decide(&entries, now) {
                Decision::Accepted { writes } => Ok(writes),
                Decision::Rejected { reason } => {
                    tracing::debug!(%reason, "decision rejected");
                    Err(ApplicationError::Domain(reason))
                }
            }
        })
        .await
    }

    /// Like [`EntryWriter::execute`], for callers that need to read more of
    /// the store (by id) while holding the user lock before deciding.
    pub async fn with_user_lock<F, Fut>(
        &self,
        user_id: &str,
        decide: F,
    ) -> Result<Vec<LoadedEntry>, ApplicationError>
    where
        F: FnOnce(Vec<LoadedEntry>, i64) -> Fut,
        Fut: std::future::Future<Output = Result<Vec<EntryWrite>, ApplicationError>>,
    {
        let _guard = with_timeout(self.timeout, self.locks.lock(user_id)).await?;
        let entries = self.user_entries(user_id).await?;
        let writes = decide(entries, self.now()).await?;
        self.persist(writes).await
    }

    /// Tombstone `time_entry_id` under `user_id`'s lock and return the record
    /// as stored afterwards.
    pub async fn tombstone(
        &self,
        user_id: &str,
        time_entry_id: &str,
        expected_version: i64,
    ) -> Result<Option<LoadedEntry>, ApplicationError> {
        let _guard = with_timeout(self.timeout, self.locks.lock(user_id)).await?;
        let deleted_at = self.now();
        with_timeout(
            self.timeout,
            self.store.delete(time_entry_id, expected_version, deleted_at),
        )
        .await??;
        self.get(time_entry_id).await
    }

    async fn persist(&self, writes: Vec<EntryWrite>) -> Result<Vec<LoadedEntry>, ApplicationError> {
        let mut written = Vec::with_capacity(writes.len());
        for EntryWrite {
            entry,
            expected_version,
        } in writes
        {
            let version = with_timeout(
                self.timeout,
                self.store.put(entry.clone(), expected_version),
            )
            .await??;
            written.push(LoadedEntry { entry, version });
        }
        Ok(written)
    }
}

/// Split the records written by a decision into the commanded entry and the
/// neighbours it flagged.
pub fn split_primary(
    mut written: Vec<LoadedEntry>,
) -> Result<(LoadedEntry, Vec<LoadedEntry>), ApplicationError> {
    if written.is_empty() {
        return Err(StoreError::Backend("decision produced no writes".into()).into());
    }
    let primary = written.remove(0);
    Ok((primary, written))
}
