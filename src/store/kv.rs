//! Plain bounded key/value cache.
//!
//! ## Architecture
//! - Values live in an `FxHashMap<String, T>` behind one `parking_lot::RwLock`.
//! - Capacity is enforced by entry count; `0` means unbounded.
//! - No eviction: once the cache holds `max_size` keys every save is rejected
//!   with [`ContainerError::Overflow`], overwrites of stored keys included.
//! - Hit/miss/insert/update/overflow counters are kept with relaxed atomics
//!   and read through `metrics()`.
//!
//! ## Core Operations
//! - `load`: fetch a copy by key (counts hits/misses).
//! - `save`: insert or overwrite by key.
//! - `snapshot`: independent copy of the whole content.
//!
//! ## Example Usage
//! ```rust
//! use containerkit::error::ContainerError;
//! use containerkit::store::kv::KeyValueCache;
//!
//! let cache: KeyValueCache<u32> = KeyValueCache::new(1);
//! cache.save("a", 1).unwrap();
//! assert_eq!(cache.load("a"), Some(1));
//! assert_eq!(cache.save("b", 2), Err(ContainerError::Overflow));
//! assert_eq!(cache.save("a", 10), Err(ContainerError::Overflow));
//! assert_eq!(cache.load("a"), Some(1));
//! ```
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{ContainerError, Result};
use crate::traits::ReadOnlyContainer;

/// Snapshot of key/value cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KvMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub overflows: u64,
}

#[derive(Debug, Default)]
struct KvCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    overflows: AtomicU64,
}

impl KvCounters {
    fn snapshot(&self) -> KvMetrics {
        KvMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            overflows: self.overflows.load(Ordering::Relaxed),
        }
    }

    fn inc(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Thread-safe key/value cache without eviction.
#[derive(Debug)]
pub struct KeyValueCache<T> {
    map: RwLock<FxHashMap<String, T>>,
    max_size: usize,
    counters: KvCounters,
}

impl<T> KeyValueCache<T> {
    /// Create a cache holding at most `max_size` keys (`0` = unbounded).
    pub fn new(max_size: usize) -> Self {
        Self {
            map: RwLock::new(FxHashMap::default()),
            max_size,
            counters: KvCounters::default(),
        }
    }

    /// Fetch a copy of the value under `key`.
    pub fn load(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        match self.map.read().get(key).cloned() {
            Some(value) => {
                KvCounters::inc(&self.counters.hits);
                Some(value)
            },
            None => {
                KvCounters::inc(&self.counters.misses);
                None
            },
        }
    }

    /// Insert or overwrite the value under `key`.
    ///
    /// A full cache rejects every save with [`ContainerError::Overflow`],
    /// including one that would only overwrite a stored key.
    pub fn save(&self, key: impl Into<String>, value: T) -> Result<()> {
        let key = key.into();
        let mut map = self.map.write();

        if self.max_size > 0 && map.len() >= self.max_size {
            trace!("kv cache overflow: key={key} max_size={}", self.max_size);
            KvCounters::inc(&self.counters.overflows);
            return Err(ContainerError::Overflow);
        }

        match map.insert(key, value) {
            Some(_) => KvCounters::inc(&self.counters.updates),
            None => KvCounters::inc(&self.counters.inserts),
        }
        Ok(())
    }

    /// Check whether `key` is stored.
    pub fn contains(&self, key: &str) -> bool {
        self.map.read().contains_key(key)
    }

    /// Independent copy of the content.
    pub fn snapshot(&self) -> HashMap<String, T>
    where
        T: Clone,
    {
        self.map
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Snapshot the cache counters.
    pub fn metrics(&self) -> KvMetrics {
        self.counters.snapshot()
    }
}

impl<T> Default for KeyValueCache<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> ReadOnlyContainer for KeyValueCache<T> {
    fn len(&self) -> usize {
        self.map.read().len()
    }

    fn capacity(&self) -> usize {
        self.max_size
    }
}
