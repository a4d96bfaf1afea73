// crates/globeway-core/src/cache.rs
//! In-memory cache with a freshness window.
//!
//! Values are stored behind an [`Arc`]: a hit hands out the very same
//! allocation, and a store replaces the previous value in one step while
//! readers holding the old `Arc` keep a consistent snapshot.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

struct Entry<V> {
    value: Arc<V>,
    stored_at: Instant,
}

pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// The cached value if it is still inside the freshness window.
    pub fn get_fresh(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.lock();
        slots
            .get(key)
            .filter(|e| e.stored_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.value))
    }

    /// The cached value regardless of its age.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.lock().get(key).map(|e| Arc::clone(&e.value))
    }

    pub fn store(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.lock().insert(
            key,
            Entry {
                value: Arc::clone(&value),
                stored_at: Instant::now(),
            },
        );
        value
    }

    pub fn invalidate(&self, key: &K) {
        self.lock().remove(key);
    }

    // A panic while holding the lock cannot leave a half-written entry,
    // so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
