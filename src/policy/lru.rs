//! # Least Recently Used (LRU) Cache
//!
//! Keyed cache that evicts the entry touched least recently. Entries are kept
//! in a single ordered sequence whose position encodes recency.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                            LruCache<T>                                   │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │                    Arc<RwLock<LruCore<T>>>                         │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                  │                                       │
//!   │                                  ▼                                       │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  entries: VecDeque<Entry<T>>                                       │ │
//!   │   │                                                                    │ │
//!   │   │  head ──► [id_1] ─ [id_2] ─ [id_3] ─ ... ─ [id_n] ◄── tail         │ │
//!   │   │          (evicted next)                   (most recent)            │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   ADD new id (cache full, max_size = 3)
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!     Before:  head ──► [A] ─ [B] ─ [C] ◄── tail
//!
//!     add_by_id(D):
//!       1. Drop [A] at head
//!       2. Append [D] at tail
//!
//!     After:   head ──► [B] ─ [C] ─ [D] ◄── tail
//!
//!   ADD existing id (touch)
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!     add_by_id(A, new_value):
//!       1. Remove [A] from its position
//!       2. Append [A] at tail with new_value
//!
//!     head ──► [A] ─ [B] ─ [C]   ──►   head ──► [B] ─ [C] ─ [A']
//!
//!   GET (no reordering)
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!     get(B) returns the value; order stays head ──► [A] ─ [B] ─ [C]
//! ```
//!
//! Only [`add_by_id`](LruCore::add_by_id) changes recency. A lookup never
//! does, which is what separates a touch from a read in this cache.
//!
//! ## Operations
//!
//! | Operation     | Time | Notes                                        |
//! |---------------|------|----------------------------------------------|
//! | `get`         | O(n) | Linear scan, no reordering                   |
//! | `position`    | O(n) | Index in recency order (0 = head)            |
//! | `add_by_id`   | O(n) | Touch, append, or evict-then-append          |
//! | `snapshot`    | O(n) | Unordered copy; recency not observable       |
//!
//! A capacity of `0` means unbounded: eviction never runs.
//!
//! ## Thread Safety
//!
//! - [`LruCore`]: not thread-safe, requires `&mut` for mutation
//! - [`LruCache`]: thread-safe via `parking_lot::RwLock`; reads share the
//!   lock, adds take it exclusively
//!
//! ## Example Usage
//!
//! ```
//! use containerkit::policy::lru::LruCache;
//! use containerkit::traits::IdCache;
//!
//! let cache = LruCache::new(3);
//! for id in ["1", "2", "3"] {
//!     cache.add_by_id(id, id.to_string()).unwrap();
//! }
//!
//! // Re-adding refreshes recency; "1" is now the newest entry.
//! cache.add_by_id("1", "one".to_string()).unwrap();
//! cache.add_by_id("4", "4".to_string()).unwrap(); // evicts "2"
//!
//! assert_eq!(cache.to_string(), "[3,one,4]");
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use log::trace;
use parking_lot::RwLock;

use crate::error::{InvariantError, Result};
use crate::traits::{IdCache, ReadOnlyContainer};

#[derive(Debug, Clone)]
struct Entry<T> {
    id: String,
    value: T,
}

/// Single-threaded LRU core.
///
/// Entries live in a `VecDeque` ordered from least to most recently touched.
pub struct LruCore<T> {
    entries: VecDeque<Entry<T>>,
    max_size: usize,
}

impl<T> LruCore<T> {
    /// Creates an empty core. `max_size == 0` means unbounded.
    ///
    /// # Example
    ///
    /// ```
    /// use containerkit::policy::lru::LruCore;
    ///
    /// let core: LruCore<u32> = LruCore::new(10);
    /// assert_eq!(core.capacity(), 10);
    /// assert!(core.is_empty());
    /// ```
    #[inline]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// Returns the index of `id` in recency order (0 = next eviction
    /// candidate).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Checks whether `id` is stored.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Returns the value stored under `id` without changing recency.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.position(id).map(|idx| &self.entries[idx].value)
    }

    /// Stores `value` under `id`.
    ///
    /// - `id` present: the entry moves to the tail carrying `value`
    /// - room left (or unbounded): a new entry is appended at the tail
    /// - at capacity: the head is dropped, then the new entry is appended
    ///
    /// Returns the evicted `(id, value)` pair, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use containerkit::policy::lru::LruCore;
    ///
    /// let mut core = LruCore::new(2);
    /// assert!(core.add_by_id("a", 1).is_none());
    /// assert!(core.add_by_id("b", 2).is_none());
    /// assert_eq!(core.add_by_id("c", 3), Some(("a".to_string(), 1)));
    /// ```
    pub fn add_by_id(&mut self, id: impl Into<String>, value: T) -> Option<(String, T)> {
        let id = id.into();

        if let Some(idx) = self.position(&id) {
            // Touch: re-append at the tail with the new value.
            if let Some(mut entry) = self.entries.remove(idx) {
                entry.value = value;
                self.entries.push_back(entry);
            }
            return None;
        }

        let evicted = if self.max_size > 0 && self.entries.len() >= self.max_size {
            self.entries
                .pop_front()
                .map(|entry| (entry.id, entry.value))
        } else {
            None
        };

        self.entries.push_back(Entry { id, value });
        evicted
    }

    /// Iterates `(id, value)` pairs from head (oldest) to tail (newest).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|entry| (entry.id.as_str(), &entry.value))
    }

    /// Identifiers in recency order, head first.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured maximum size (`0` = unbounded).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Returns an unordered copy of the content.
    pub fn snapshot(&self) -> HashMap<String, T>
    where
        T: Clone,
    {
        self.entries
            .iter()
            .map(|entry| (entry.id.clone(), entry.value.clone()))
            .collect()
    }

    /// Validates size and identifier uniqueness.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            return Err(InvariantError::new(format!(
                "lru holds {} entries, max_size is {}",
                self.entries.len(),
                self.max_size
            )));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for entry in &self.entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(InvariantError::new(format!(
                    "duplicate id in recency list: {}",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}

impl<T> Default for LruCore<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: fmt::Display> fmt::Display for LruCore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", entry.value)?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for LruCore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.entries.len())
            .field("max_size", &self.max_size)
            .field("ids", &self.ids())
            .finish()
    }
}

/// Thread-safe LRU cache.
///
/// Cloning the handle shares the same underlying cache.
#[derive(Clone)]
pub struct LruCache<T> {
    inner: Arc<RwLock<LruCore<T>>>,
}

impl<T> LruCache<T> {
    /// Creates an empty cache. `max_size == 0` means unbounded.
    ///
    /// ```
    /// use containerkit::policy::lru::LruCache;
    /// use containerkit::traits::ReadOnlyContainer;
    ///
    /// let cache: LruCache<String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LruCore::new(max_size))),
        }
    }

    /// Returns the index of `id` in recency order (0 = next eviction
    /// candidate).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.inner.read().position(id)
    }

    /// Identifiers in recency order, head first.
    pub fn ids(&self) -> Vec<String> {
        self.inner.read().ids()
    }

    /// Validates the core's invariants under a read lock.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

impl<T> Default for LruCache<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> ReadOnlyContainer for LruCache<T> {
    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }
}

impl<T: Clone> IdCache<T> for LruCache<T> {
    fn get(&self, id: &str) -> Option<T> {
        self.inner.read().get(id).cloned()
    }

    fn contains(&self, id: &str) -> bool {
        self.inner.read().contains(id)
    }

    /// Never fails: a full cache evicts its oldest entry instead.
    fn add_by_id(&self, id: impl Into<String>, value: T) -> Result<()> {
        let mut core = self.inner.write();
        if let Some((evicted, _)) = core.add_by_id(id, value) {
            trace!("lru evicted id={evicted}");
        }
        Ok(())
    }

    fn snapshot(&self) -> HashMap<String, T> {
        self.inner.read().snapshot()
    }
}

impl<T: fmt::Display> fmt::Display for LruCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read();
        fmt::Display::fmt(&*core, f)
    }
}

impl<T> fmt::Debug for LruCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read();
        f.debug_struct("LruCache")
            .field("len", &core.len())
            .field("max_size", &core.capacity())
            .finish_non_exhaustive()
    }
}
