//! Unified builder for every container in the crate.
//!
//! The only configuration knob is the maximum size (`0` = unbounded). For the
//! eviction caches, [`CachePolicy`] picks the algorithm and
//! [`EvictingCache`] hides which one was chosen.
//!
//! ## Example
//!
//! ```rust
//! use containerkit::builder::{CacheBuilder, CachePolicy};
//! use containerkit::traits::{IdCache, ReadOnlyContainer};
//!
//! let cache = CacheBuilder::new(2).build::<String>(CachePolicy::Lru);
//! cache.add_by_id("a", "alpha".to_string()).unwrap();
//! cache.add_by_id("b", "beta".to_string()).unwrap();
//! cache.add_by_id("c", "gamma".to_string()).unwrap();
//!
//! assert_eq!(cache.len(), 2);
//! assert!(!cache.contains("a"));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::ds::{BoundedQueue, BoundedStack};
use crate::error::Result;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::store::kv::KeyValueCache;
use crate::traits::{IdCache, ReadOnlyContainer};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used: evict the entry added or re-added longest ago.
    Lru,
    /// Least Frequently Used: evict the entry read least often.
    Lfu,
}

/// Eviction cache with the policy chosen at build time.
#[derive(Clone)]
pub enum EvictingCache<T> {
    Lru(LruCache<T>),
    Lfu(LfuCache<T>),
}

impl<T> EvictingCache<T> {
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match self {
            Self::Lru(_) => CachePolicy::Lru,
            Self::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Cumulative `(hits, misses)`; only LFU caches track them.
    pub fn stats(&self) -> Option<(u64, u64)> {
        match self {
            Self::Lru(_) => None,
            Self::Lfu(lfu) => Some(lfu.stats()),
        }
    }
}

impl<T> ReadOnlyContainer for EvictingCache<T> {
    fn len(&self) -> usize {
        match self {
            Self::Lru(lru) => lru.len(),
            Self::Lfu(lfu) => lfu.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Self::Lru(lru) => lru.capacity(),
            Self::Lfu(lfu) => lfu.capacity(),
        }
    }
}

impl<T: Clone> IdCache<T> for EvictingCache<T> {
    fn get(&self, id: &str) -> Option<T> {
        match self {
            Self::Lru(lru) => lru.get(id),
            Self::Lfu(lfu) => lfu.get(id),
        }
    }

    fn contains(&self, id: &str) -> bool {
        match self {
            Self::Lru(lru) => lru.contains(id),
            Self::Lfu(lfu) => lfu.contains(id),
        }
    }

    fn add_by_id(&self, id: impl Into<String>, value: T) -> Result<()> {
        match self {
            Self::Lru(lru) => lru.add_by_id(id, value),
            Self::Lfu(lfu) => lfu.add_by_id(id, value),
        }
    }

    fn snapshot(&self) -> HashMap<String, T> {
        match self {
            Self::Lru(lru) => lru.snapshot(),
            Self::Lfu(lfu) => lfu.snapshot(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for EvictingCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru(lru) => fmt::Display::fmt(lru, f),
            Self::Lfu(lfu) => fmt::Display::fmt(lfu, f),
        }
    }
}

impl<T> fmt::Debug for EvictingCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru(lru) => fmt::Debug::fmt(lru, f),
            Self::Lfu(lfu) => fmt::Debug::fmt(lfu, f),
        }
    }
}

/// Builder for creating container instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheBuilder {
    max_size: usize,
}

impl CacheBuilder {
    /// Create a builder for containers holding at most `max_size` elements.
    /// `0` means unbounded.
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// Build an eviction cache with the specified policy.
    ///
    /// ```rust
    /// use containerkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64>(CachePolicy::Lfu);
    /// assert_eq!(lfu.stats(), Some((0, 0)));
    /// assert_eq!(lru.stats(), None);
    /// ```
    pub fn build<T>(self, policy: CachePolicy) -> EvictingCache<T> {
        match policy {
            CachePolicy::Lru => EvictingCache::Lru(LruCache::new(self.max_size)),
            CachePolicy::Lfu => EvictingCache::Lfu(LfuCache::new(self.max_size)),
        }
    }

    /// Build a bounded LIFO stack.
    pub fn stack<T>(self) -> BoundedStack<T> {
        BoundedStack::new(self.max_size)
    }

    /// Build a bounded FIFO queue.
    pub fn queue<T>(self) -> BoundedQueue<T> {
        BoundedQueue::new(self.max_size)
    }

    /// Build a key/value cache that rejects saves past capacity.
    pub fn key_value<T>(self) -> KeyValueCache<T> {
        KeyValueCache::new(self.max_size)
    }
}
