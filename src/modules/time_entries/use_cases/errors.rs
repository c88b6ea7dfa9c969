use thiserror::Error;

use crate::modules::time_entries::adapters::outbound::entry_store::StoreError;
use crate::modules::time_entries::use_cases::decision::DecideError;
use crate::shared::infrastructure::timeout::TimedOut;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("domain rejected: {0}")]
    Domain(#[from] DecideError),
}

impl From<TimedOut> for ApplicationError {
    fn from(value: TimedOut) -> Self {
        ApplicationError::Store(StoreError::Timeout(value))
    }
}

impl ApplicationError {
    /// Stale version token: the caller must refetch and retry.
    pub fn is_version_conflict(&self) -> bool {
        matches!(
            self,
            ApplicationError::Store(StoreError::VersionMismatch { .. })
        )
    }

    /// Transient failure that is safe to retry with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::Store(StoreError::Timeout(_)))
    }
}
