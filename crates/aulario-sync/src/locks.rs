//! Per-identity-id single-writer serialization.
//!
//! A webhook replay and a direct update for the same identity may arrive
//! concurrently; the stores themselves impose no cross-call ordering. This
//! keyed lock makes every mutation for one identity id run alone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// A map of async mutexes keyed by identity id.
///
/// Entries are created on first use and kept for the process lifetime; the
/// key space is the set of identities this instance has touched, which is
/// small for the deployments this serves.
#[derive(Debug, Default)]
pub struct IdLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl IdLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting if another writer holds it.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut map = self.inner.lock().expect("lock table poisoned");
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }
}
