// In memory implementation of the TimeEntryStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep one partition per user so writers for different users never contend.
// - Keep an id -> user index so lookups by id stay cheap.
// - Enforce optimistic concurrency by checking the expected version.
//
// All locks a mutation needs are acquired before the first field changes, so a
// cancelled call either applied completely or not at all.

use crate::modules::time_entries::adapters::outbound::entry_store::{StoreError, TimeEntryStore};
use crate::modules::time_entries::core::interval::TimeRange;
use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus, TimeEntry};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

type Partition = Arc<RwLock<HashMap<String, LoadedEntry>>>;

#[derive(Default)]
pub struct InMemoryTimeEntryStore {
    partitions: RwLock<HashMap<String, Partition>>,
    owners: RwLock<HashMap<String, String>>,
    is_offline: bool,
    delay_ms: AtomicU64,
}

impl InMemoryTimeEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Stall every operation by `ms` before touching any state.
    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    async fn ready(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Time entry store offline".into()));
        }
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(())
    }

    async fn existing_partition(&self, user_id: &str) -> Option<Partition> {
        self.partitions.read().await.get(user_id).cloned()
    }

    async fn partition(&self, user_id: &str) -> Partition {
        if let Some(partition) = self.existing_partition(user_id).await {
            return partition;
        }
        self.partitions
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .clone()
    }

    async fn owner_of(&self, time_entry_id: &str) -> Option<String> {
        self.owners.read().await.get(time_entry_id).cloned()
    }
}

fn intersects(entry: &TimeEntry, range: &TimeRange) -> bool {
    if entry.start_time >= range.end {
        return false;
    }
    match entry.end_time {
        None => true,
        Some(end) => end > range.start || entry.start_time >= range.start,
    }
}

#[async_trait::async_trait]
impl TimeEntryStore for InMemoryTimeEntryStore {
    async fn get(&self, time_entry_id: &str) -> Result<Option<LoadedEntry>, StoreError> {
        self.ready().await?;
        let Some(user_id) = self.owner_of(time_entry_id).await else {
            return Ok(None);
        };
        let Some(partition) = self.existing_partition(&user_id).await else {
            return Ok(None);
        };
        let rows = partition.read().await;
        Ok(rows.get(time_entry_id).cloned())
    }

    async fn put(&self, entry: TimeEntry, expected_version: i64) -> Result<i64, StoreError> {
        self.ready().await?;
        let partition = self.partition(&entry.user_id).await;
        let mut rows = partition.write().await;
        let actual = rows
            .get(&entry.time_entry_id)
            .map(|row| row.version)
            .unwrap_or(0);
        if actual != expected_version {
            return Err(StoreError::VersionMismatch {
                time_entry_id: entry.time_entry_id,
                expected: expected_version,
                actual,
            });
        }

        if actual == 0 {
            let mut owners = self.owners.write().await;
            if let Some(owner) = owners.get(&entry.time_entry_id) {
                return Err(StoreError::Backend(format!(
                    "time entry {} belongs to {owner}",
                    entry.time_entry_id
                )));
            }
            owners.insert(entry.time_entry_id.clone(), entry.user_id.clone());
        }

        let version = actual + 1;
        rows.insert(
            entry.time_entry_id.clone(),
            LoadedEntry { entry, version },
        );
        Ok(version)
    }

    async fn delete(
        &self,
        time_entry_id: &str,
        expected_version: i64,
        deleted_at: i64,
    ) -> Result<i64, StoreError> {
        self.ready().await?;
        let missing = || StoreError::VersionMismatch {
            time_entry_id: time_entry_id.to_string(),
            expected: expected_version,
            actual: 0,
        };
        let user_id = self.owner_of(time_entry_id).await.ok_or_else(missing)?;
        let partition = self
            .existing_partition(&user_id)
            .await
            .ok_or_else(missing)?;
        let mut rows = partition.write().await;
        let row = rows.get_mut(time_entry_id).ok_or_else(missing)?;
        if row.entry.is_deleted() {
            return Ok(row.version);
        }
        if row.version != expected_version {
            return Err(StoreError::VersionMismatch {
                time_entry_id: time_entry_id.to_string(),
                expected: expected_version,
                actual: row.version,
            });
        }
        row.entry.deleted_at = Some(deleted_at);
        row.entry.modified_at = Some(deleted_at);
        row.entry.sync_status = SyncStatus::Pending;
        row.version += 1;
        Ok(row.version)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        range: TimeRange,
        include_deleted: bool,
    ) -> Result<Vec<LoadedEntry>, StoreError> {
        self.ready().await?;
        let Some(partition) = self.existing_partition(user_id).await else {
            return Ok(Vec::new());
        };
        let rows = partition.read().await;
        let mut items: Vec<LoadedEntry> = rows
            .values()
            .filter(|row| include_deleted || !row.entry.is_deleted())
            .filter(|row| intersects(&row.entry, &range))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.entry
                .start_time
                .cmp(&b.entry.start_time)
                .then_with(|| a.entry.time_entry_id.cmp(&b.entry.time_entry_id))
        });
        Ok(items)
    }
}
