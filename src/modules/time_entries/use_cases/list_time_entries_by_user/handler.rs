use std::sync::Arc;
use std::time::Duration;

use crate::modules::time_entries::adapters::outbound::entry_store::TimeEntryStore;
use crate::modules::time_entries::core::interval::TimeRange;
use crate::modules::time_entries::core::time_entry::LoadedEntry;
use crate::modules::time_entries::use_cases::decision::{validate_range, validate_user};
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::shared::infrastructure::timeout::with_timeout;

/// Entries of one user whose span intersects `[from, to)`. Missing bounds are
/// unbounded; open entries intersect every window that ends after their start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTimeEntries {
    pub user_id: String,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub include_deleted: bool,
}

impl ListTimeEntries {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            from: None,
            to: None,
            include_deleted: false,
        }
    }
}

/// Read side. Queries never take the per-user write lock; each call sees the
/// store's state at the time it runs.
pub struct TimeEntryQueryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    store: Arc<TStore>,
    timeout: Duration,
}

impl<TStore> TimeEntryQueryHandler<TStore>
where
    TStore: TimeEntryStore + 'static,
{
    pub fn new(store: Arc<TStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Matching entries in ascending start time order.
    pub async fn list(&self, query: ListTimeEntries) -> Result<Vec<LoadedEntry>, ApplicationError> {
        validate_user(&query.user_id)?;
        let range = TimeRange::new(
            query.from.unwrap_or(i64::MIN),
            query.to.unwrap_or(i64::MAX),
        );
        validate_range(range.start, Some(range.end))?;
        let entries = with_timeout(
            self.timeout,
            self.store
                .list_by_user(&query.user_id, range, query.include_deleted),
        )
        .await??;
        Ok(entries)
    }

    /// Single entry by id, tombstones included.
    pub async fn get(&self, time_entry_id: &str) -> Result<Option<LoadedEntry>, ApplicationError> {
        Ok(with_timeout(self.timeout, self.store.get(time_entry_id)).await??)
    }
}
