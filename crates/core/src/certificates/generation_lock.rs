//! Per-target mutual exclusion for check-then-generate sequences.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes generation requests that target the same record.
///
/// Entries are created on demand and dropped once nobody holds or waits on
/// them. Only requests within this process are serialized.
#[derive(Debug, Default)]
pub struct GenerationLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl GenerationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until `key` is free and holds it until the guard is dropped.
    pub async fn acquire(&self, key: &str) -> GenerationGuard<'_> {
        let mutex = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        GenerationGuard {
            locks: self,
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or awaited.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// Holds one generation key.
pub struct GenerationGuard<'a> {
    locks: &'a GenerationLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // the map's own reference is the last one once no request waits
        self.locks
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Lock key of a transaction certificate.
pub fn transaction_key(transaction_id: &str) -> String {
    format!("tx:{}", transaction_id)
}

/// Lock key of a portfolio summary.
pub fn portfolio_key(user_id: &str, property_id: &str) -> String {
    format!("portfolio:{}:{}", user_id, property_id)
}
