// Port for keyed time entry persistence with optimistic concurrency.
//
// Version tokens
// - 0 means "no record". An insert expects 0 and produces version 1.
// - Every successful put or delete bumps the version by exactly one.
// - A mutation whose expected version differs from the stored one fails with
//   `VersionMismatch` and leaves the record untouched.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::time_entries::core::interval::TimeRange;
use crate::modules::time_entries::core::time_entry::{LoadedEntry, TimeEntry};
use crate::shared::infrastructure::timeout::TimedOut;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("version mismatch on {time_entry_id}: expected {expected}, actual {actual}")]
    VersionMismatch {
        time_entry_id: String,
        expected: i64,
        actual: i64,
    },

    #[error(transparent)]
    Timeout(#[from] TimedOut),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TimeEntryStore: Send + Sync {
    async fn get(&self, time_entry_id: &str) -> Result<Option<LoadedEntry>, StoreError>;

    /// Insert or replace `entry`, returning the new version.
    async fn put(&self, entry: TimeEntry, expected_version: i64) -> Result<i64, StoreError>;

    /// Tombstone the entry, returning the new version. Deleting an already
    /// tombstoned entry is a no-op that returns the current version; unknown
    /// ids fail with `VersionMismatch { actual: 0, .. }`.
    async fn delete(
        &self,
        time_entry_id: &str,
        expected_version: i64,
        deleted_at: i64,
    ) -> Result<i64, StoreError>;

    /// Entries of `user_id` whose interval intersects `range`, ordered by start
    /// time. Open entries are treated as unbounded to the right.
    async fn list_by_user(
        &self,
        user_id: &str,
        range: TimeRange,
        include_deleted: bool,
    ) -> Result<Vec<LoadedEntry>, StoreError>;
}
