//! Keyed async locks enforcing one writer per user and per poll.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::id::{PollId, UserId};

/// Registry of per-entity mutexes.
///
/// Entries are created on first use. Entries nobody holds or waits on are
/// pruned on the next acquire, so the registry stays bounded by the number
/// of keys in flight. Callers that need both a user and a poll lock must
/// take the user lock first.
#[derive(Default)]
pub struct EntityLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl EntityLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize mutations of one user's balance.
    pub async fn user(&self, id: &UserId) -> OwnedMutexGuard<()> {
        self.acquire(format!("user:{id}")).await
    }

    /// Serialize mutations of one poll and its bet set.
    pub async fn poll(&self, id: &PollId) -> OwnedMutexGuard<()> {
        self.acquire(format!("poll:{id}")).await
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    async fn acquire(&self, key: String) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard guard is released before awaiting.
        let lock = self.locks.entry(key).or_default().clone();
        // Holders and waiters keep a clone; a lone registry reference is idle.
        self.locks.retain(|_, entry| Arc::strong_count(entry) > 1);
        lock.lock_owned().await
    }
}
