//! Keyed async mutexes with bounded optimistic retry.
//!
//! `acquire` first polls with `try_lock` and exponential backoff, logging each
//! contended attempt, then parks on the mutex. It never fails.

use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use beacon_core::errors::LockError;
use beacon_observability::tracing_setup::events;

/// Held lock plus how many attempts found it busy.
#[derive(Debug)]
pub struct KeyedGuard {
    _guard: OwnedMutexGuard<()>,
    pub contentions: u32,
}

#[derive(Debug)]
pub struct KeyedLocks<K: Eq + Hash> {
    scope: &'static str,
    slots: DashMap<K, Arc<Mutex<()>>>,
    retry_attempts: u32,
    backoff: Duration,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new(scope: &'static str, retry_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            scope,
            slots: DashMap::new(),
            retry_attempts,
            backoff: Duration::from_millis(backoff_ms),
        }
    }

    fn slot(&self, key: &K) -> Arc<Mutex<()>> {
        self.slots.entry(key.clone()).or_default().clone()
    }

    /// Single non-blocking attempt.
    pub fn try_acquire(&self, key: &K) -> Result<KeyedGuard, LockError> {
        self.slot(key)
            .try_lock_owned()
            .map(|guard| KeyedGuard {
                _guard: guard,
                contentions: 0,
            })
            .map_err(|_| LockError::Contended {
                scope: self.scope.to_string(),
                key: key.to_string(),
                attempts: 1,
            })
    }

    pub async fn acquire(&self, key: &K) -> KeyedGuard {
        let slot = self.slot(key);
        let mut delay = self.backoff;
        for attempt in 1..=self.retry_attempts {
            match slot.clone().try_lock_owned() {
                Ok(guard) => {
                    return KeyedGuard {
                        _guard: guard,
                        contentions: attempt - 1,
                    }
                }
                Err(_) => {
                    events::lock_contended(self.scope, &key.to_string(), attempt);
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
            }
        }
        KeyedGuard {
            _guard: slot.lock_owned().await,
            contentions: self.retry_attempts,
        }
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }
}
