// Fine grained mutual exclusion keyed by an arbitrary string (a user id here).
//
// Mutations for one key queue behind each other; different keys never contend
// beyond the short critical section on the registry map.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

const PRUNE_THRESHOLD: usize = 1024;

#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.locks.lock().await;
            if registry.len() >= PRUNE_THRESHOLD {
                registry.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            registry
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
