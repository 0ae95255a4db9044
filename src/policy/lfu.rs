//! # LFU (Least Frequently Used) Cache
//!
//! Keyed cache that evicts the entry read least often. Every entry carries
//! an access counter and an insertion tick; every add halves all counters so
//! an entry that was hot long ago does not stay entrenched forever.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                             LfuCache<T>                                  │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │                    Arc<RwLock<LfuCore<T>>>                         │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                  │                                       │
//!   │                                  ▼                                       │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  entries: FxHashMap<String, Entry<T>>                              │ │
//!   │   │                                                                    │ │
//!   │   │  ┌─────────┬───────────┬─────────────┬──────────┐                  │ │
//!   │   │  │   id    │ frequency │ inserted_at │  value   │                  │ │
//!   │   │  ├─────────┼───────────┼─────────────┼──────────┤                  │ │
//!   │   │  │ "A"     │     3     │      1      │   ...    │                  │ │
//!   │   │  │ "B"     │     0     │      2      │   ...    │ ← victim         │ │
//!   │   │  │ "C"     │     1     │      3      │   ...    │                  │ │
//!   │   │  └─────────┴───────────┴─────────────┴──────────┘                  │ │
//!   │   │                                                                    │ │
//!   │   │  hits / misses: AtomicU64 (bumped under the read lock)             │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Add Flow
//!
//! ```text
//!   add_by_id(id, value)
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ id already stored?                                                     │
//!   │   YES → halve every counter, return Duplicate (value untouched)        │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │ NO
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ at max_size?                                                           │
//!   │   YES → evict min (frequency, inserted_at, id)                         │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   halve every counter, insert entry with frequency 0 and the next tick
//! ```
//!
//! The victim is ranked on the counters accumulated since the previous add;
//! the halving applied by this add affects later rankings. Ties on frequency
//! go to the oldest insertion, then to the smallest id, so eviction is fully
//! deterministic regardless of map iteration order.
//!
//! ## Operations
//!
//! | Operation   | Time | Lock   | Notes                                   |
//! |-------------|------|--------|-----------------------------------------|
//! | `get`       | O(1) | read   | Bumps frequency and hit/miss counters   |
//! | `contains`  | O(1) | read   | No side effects                         |
//! | `add_by_id` | O(n) | write  | Halving pass plus linear victim scan    |
//! | `stats`     | O(1) | read   | Cumulative `(hits, misses)`             |
//! | `snapshot`  | O(n) | read   | Values only, no counters                |
//!
//! Rendering with `Display` lists values in map order, which is unspecified.
//!
//! ## Example Usage
//!
//! ```
//! use containerkit::policy::lfu::LfuCache;
//! use containerkit::traits::IdCache;
//!
//! let cache = LfuCache::new(3);
//! cache.add_by_id("A", 'a').unwrap();
//! cache.add_by_id("B", 'b').unwrap();
//! cache.add_by_id("C", 'c').unwrap();
//!
//! cache.get("A");
//! cache.get("C");
//!
//! cache.add_by_id("D", 'd').unwrap(); // "B" was never read
//! assert!(!cache.contains("B"));
//! assert_eq!(cache.stats(), (2, 0));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{ContainerError, InvariantError, Result};
use crate::traits::{IdCache, ReadOnlyContainer};

#[derive(Debug)]
struct Entry<T> {
    frequency: AtomicU64,
    inserted_at: u64,
    value: T,
}

impl<T> Entry<T> {
    #[inline]
    fn frequency(&self) -> u64 {
        self.frequency.load(Ordering::Relaxed)
    }
}

/// Single-threaded LFU core.
///
/// Reads go through `&self`; counters use atomics so a core behind a shared
/// read lock can still record accesses.
pub struct LfuCore<T> {
    entries: FxHashMap<String, Entry<T>>,
    max_size: usize,
    /// Logical insertion clock, strictly increasing per instance.
    tick: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> LfuCore<T> {
    /// Creates an empty core. `max_size == 0` means unbounded.
    #[inline]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            max_size,
            tick: 0,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the value under `id`, counting the access.
    ///
    /// A hit bumps the entry's frequency and the hit counter; a miss bumps
    /// the miss counter.
    pub fn get(&self, id: &str) -> Option<&T> {
        match self.entries.get(id) {
            Some(entry) => {
                entry.frequency.fetch_add(1, Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(&entry.value)
            },
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            },
        }
    }

    /// Checks whether `id` is stored. Does not count as an access.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Current access counter of `id`.
    pub fn frequency(&self, id: &str) -> Option<u64> {
        self.entries.get(id).map(Entry::frequency)
    }

    /// Stores `value` under a new `id`.
    ///
    /// Every call halves all access counters, including calls that fail
    /// with [`ContainerError::Duplicate`]. A duplicate leaves the stored
    /// value untouched.
    ///
    /// When the core is full, the victim is ranked on the counters as they
    /// stand before this call's halving, unlike a strict halve-then-rank
    /// order. A single read therefore still protects an entry from the next
    /// eviction.
    ///
    /// Returns the evicted `(id, value)` pair, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use containerkit::policy::lfu::LfuCore;
    ///
    /// let mut core = LfuCore::new(2);
    /// core.add_by_id("a", 1).unwrap();
    /// core.add_by_id("b", 2).unwrap();
    /// core.get("b");
    ///
    /// let evicted = core.add_by_id("c", 3).unwrap();
    /// assert_eq!(evicted, Some(("a".to_string(), 1)));
    /// assert!(core.add_by_id("b", 20).unwrap_err().is_duplicate());
    /// assert_eq!(core.get("b"), Some(&2));
    /// ```
    pub fn add_by_id(&mut self, id: impl Into<String>, value: T) -> Result<Option<(String, T)>> {
        let id = id.into();

        if self.entries.contains_key(&id) {
            self.halve_frequencies();
            return Err(ContainerError::duplicate(id));
        }

        let evicted = if self.max_size > 0 && self.entries.len() >= self.max_size {
            self.evict()
        } else {
            None
        };

        self.halve_frequencies();

        self.tick += 1;
        self.entries.insert(
            id,
            Entry {
                frequency: AtomicU64::new(0),
                inserted_at: self.tick,
                value,
            },
        );

        Ok(evicted)
    }

    /// Cumulative `(hits, misses)` of [`get`](Self::get).
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    /// Iterates `(id, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(id, entry)| (id.as_str(), &entry.value))
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

    /// Returns an unordered copy of the values.
    pub fn snapshot(&self) -> HashMap<String, T>
    where
        T: Clone,
    {
        self.entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.value.clone()))
            .collect()
    }

    /// Validates size and insertion-tick bookkeeping.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            return Err(InvariantError::new(format!(
                "lfu holds {} entries, max_size is {}",
                self.entries.len(),
                self.max_size
            )));
        }

        let mut ticks = rustc_hash::FxHashSet::default();
        for (id, entry) in &self.entries {
            if entry.inserted_at == 0 || entry.inserted_at > self.tick {
                return Err(InvariantError::new(format!(
                    "entry {id} has insertion tick {} outside 1..={}",
                    entry.inserted_at, self.tick
                )));
            }
            if !ticks.insert(entry.inserted_at) {
                return Err(InvariantError::new(format!(
                    "insertion tick {} shared by more than one entry",
                    entry.inserted_at
                )));
            }
        }
        Ok(())
    }

    /// Least valuable entry: lowest frequency, oldest insertion, smallest id.
    fn victim(&self) -> Option<&str> {
        self.entries
            .iter()
            .min_by(|(a_id, a), (b_id, b)| {
                a.frequency()
                    .cmp(&b.frequency())
                    .then(a.inserted_at.cmp(&b.inserted_at))
                    .then_with(|| a_id.cmp(b_id))
            })
            .map(|(id, _)| id.as_str())
    }

    fn evict(&mut self) -> Option<(String, T)> {
        let id = self.victim()?.to_owned();
        self.entries
            .remove_entry(&id)
            .map(|(id, entry)| (id, entry.value))
    }

    fn halve_frequencies(&mut self) {
        for entry in self.entries.values_mut() {
            let frequency = entry.frequency.get_mut();
            *frequency /= 2;
        }
    }
}

impl<T> Default for LfuCore<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: fmt::Display> fmt::Display for LfuCore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.entries.values().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", entry.value)?;
        }
        f.write_str("]")
    }
}

impl<T> fmt::Debug for LfuCore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hits, misses) = self.stats();
        f.debug_struct("LfuCore")
            .field("len", &self.entries.len())
            .field("max_size", &self.max_size)
            .field("hits", &hits)
            .field("misses", &misses)
            .finish_non_exhaustive()
    }
}

/// Thread-safe LFU cache.
///
/// `get` runs under the shared lock, so concurrent readers do not block
/// each other. Cloning the handle shares the same underlying cache.
#[derive(Clone)]
pub struct LfuCache<T> {
    inner: Arc<RwLock<LfuCore<T>>>,
}

impl<T> LfuCache<T> {
    /// Creates an empty cache. `max_size == 0` means unbounded.
    ///
    /// ```
    /// use containerkit::policy::lfu::LfuCache;
    /// use containerkit::traits::ReadOnlyContainer;
    ///
    /// let cache: LfuCache<u64> = LfuCache::new(8);
    /// assert_eq!(cache.capacity(), 8);
    /// assert_eq!(cache.stats(), (0, 0));
    /// ```
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LfuCore::new(max_size))),
        }
    }

    /// Cumulative `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        self.inner.read().stats()
    }

    /// Current access counter of `id`.
    pub fn frequency(&self, id: &str) -> Option<u64> {
        self.inner.read().frequency(id)
    }

    /// Validates the core's invariants under a read lock.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

impl<T> Default for LfuCache<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> ReadOnlyContainer for LfuCache<T> {
    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }
}

impl<T: Clone> IdCache<T> for LfuCache<T> {
    fn get(&self, id: &str) -> Option<T> {
        self.inner.read().get(id).cloned()
    }

    fn contains(&self, id: &str) -> bool {
        self.inner.read().contains(id)
    }

    /// Fails with [`ContainerError::Duplicate`] when `id` is already stored.
    fn add_by_id(&self, id: impl Into<String>, value: T) -> Result<()> {
        let mut core = self.inner.write();
        match core.add_by_id(id, value) {
            Ok(Some((evicted, _))) => {
                trace!("lfu evicted id={evicted}");
                Ok(())
            },
            Ok(None) => Ok(()),
            Err(err) => {
                debug!("lfu rejected add: {err}");
                Err(err)
            },
        }
    }

    fn snapshot(&self) -> HashMap<String, T> {
        self.inner.read().snapshot()
    }
}

impl<T: fmt::Display> fmt::Display for LfuCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read();
        fmt::Display::fmt(&*core, f)
    }
}

impl<T> fmt::Debug for LfuCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::identity::Identify;

    fn filled(max_size: usize, n: usize) -> LfuCache<String> {
        let cache = LfuCache::new(max_size);
        for i in 1..=n {
            let id = i.to_string();
            cache.add_by_id(id.clone(), id).unwrap();
        }
        cache
    }

    fn values(cache: &LfuCache<String>) -> HashSet<String> {
        cache.snapshot().into_values().collect()
    }

    mod eviction {
        use super::*;

        #[test]
        fn cold_entry_is_evicted() {
            let cache = LfuCache::new(3);
            cache.add_by_id("A", "A".to_string()).unwrap();
            cache.add_by_id("B", "B".to_string()).unwrap();
            cache.add_by_id("C", "C".to_string()).unwrap();

            assert!(cache.get("A").is_some());
            assert!(cache.get("C").is_some());

            cache.add_by_id("D", "D".to_string()).unwrap();

            let expected: HashSet<String> =
                ["A", "C", "D"].iter().map(|s| s.to_string()).collect();
            assert_eq!(values(&cache), expected);
        }

        #[test]
        fn unread_entry_among_many_is_evicted() {
            let cache = filled(10, 10);
            for i in (1..=10).filter(|i| *i != 4) {
                assert!(cache.get(&i.to_string()).is_some());
            }

            cache.add_by_id("11", "11".to_string()).unwrap();

            assert_eq!(cache.len(), 10);
            assert!(!cache.contains("4"));
            assert!(cache.contains("11"));
        }

        #[test]
        fn equal_frequency_evicts_oldest() {
            let cache = filled(3, 3);
            cache.add_by_id("4", "4".to_string()).unwrap();
            assert!(!cache.contains("1"));

            cache.add_by_id("5", "5".to_string()).unwrap();
            assert!(!cache.contains("2"));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn unbounded_never_evicts() {
            let cache = filled(0, 500);
            assert_eq!(cache.len(), 500);
        }

        #[test]
        fn single_slot_replaces_entry() {
            let cache = LfuCache::new(1);
            cache.add_by_id("a", 1).unwrap();
            cache.get("a");
            cache.add_by_id("b", 2).unwrap();
            assert_eq!(cache.snapshot().into_keys().collect::<Vec<_>>(), vec!["b"]);
        }

        #[test]
        fn huge_bound_allocates_lazily() {
            let cache: LfuCache<u8> = LfuCache::new(usize::MAX);
            assert!(cache.is_empty());
            cache.add_by_id("a", 1).unwrap();
            assert_eq!(cache.capacity(), usize::MAX);
            assert_eq!(cache.get("a"), Some(1));
        }
    }

    mod frequency {
        use super::*;

        #[test]
        fn get_increments_frequency() {
            let cache = filled(5, 1);
            assert_eq!(cache.frequency("1"), Some(0));
            cache.get("1");
            cache.get("1");
            cache.get("1");
            assert_eq!(cache.frequency("1"), Some(3));
        }

        #[test]
        fn contains_does_not_count() {
            let cache = filled(5, 1);
            assert!(cache.contains("1"));
            assert_eq!(cache.frequency("1"), Some(0));
            assert_eq!(cache.stats(), (0, 0));
        }

        #[test]
        fn add_halves_all_counters() {
            let cache = filled(0, 2);
            for _ in 0..5 {
                cache.get("1");
            }
            for _ in 0..4 {
                cache.get("2");
            }

            cache.add_by_id("3", "3".to_string()).unwrap();
            assert_eq!(cache.frequency("1"), Some(2));
            assert_eq!(cache.frequency("2"), Some(2));
            assert_eq!(cache.frequency("3"), Some(0));

            cache.add_by_id("4", "4".to_string()).unwrap();
            assert_eq!(cache.frequency("1"), Some(1));
        }

        #[test]
        fn stale_popularity_decays() {
            let cache = LfuCache::new(2);
            cache.add_by_id("old", 0).unwrap();
            for _ in 0..4 {
                cache.get("old");
            }
            cache.add_by_id("new", 1).unwrap(); // old: 4 -> 2
            cache.get("new"); // new: 1

            // old and new rank 2 vs 1: new is evicted, counters halve to 1 and 0.
            cache.add_by_id("x", 2).unwrap();
            assert!(!cache.contains("new"));

            cache.add_by_id("y", 3).unwrap(); // old: 1 vs x: 0
            assert!(!cache.contains("x"));

            cache.add_by_id("z", 4).unwrap(); // old: 0 vs y: 0, old is older
            assert!(!cache.contains("old"));
        }
    }

    mod duplicates {
        use super::*;

        #[test]
        fn duplicate_is_rejected_and_value_kept() {
            let cache = filled(5, 3);
            let err = cache.add_by_id("2", "changed".to_string()).unwrap_err();

            assert_eq!(err, ContainerError::duplicate("2"));
            assert_eq!(cache.get("2"), Some("2".to_string()));
            assert_eq!(cache.len(), 3);
        }

        #[test]
        fn duplicate_still_halves_counters() {
            let cache = filled(5, 1);
            for _ in 0..6 {
                cache.get("1");
            }
            assert!(cache.add_by_id("1", "1".to_string()).is_err());
            assert_eq!(cache.frequency("1"), Some(3));
        }

        #[test]
        fn duplicate_at_capacity_does_not_evict() {
            let cache = filled(3, 3);
            assert!(cache.add_by_id("3", "x".to_string()).is_err());
            assert_eq!(cache.len(), 3);
            assert!(cache.contains("1"));
        }
    }

    mod stats {
        use super::*;

        #[test]
        fn hits_and_misses_are_cumulative() {
            let cache = filled(10, 5);
            for i in 1..=5 {
                assert!(cache.get(&i.to_string()).is_some());
            }
            for i in 0..7 {
                assert!(cache.get(&format!("missing-{i}")).is_none());
            }
            assert_eq!(cache.stats(), (5, 7));

            cache.add_by_id("6", "6".to_string()).unwrap();
            assert_eq!(cache.stats(), (5, 7));
        }
    }

    mod identity {
        use super::*;

        #[derive(Debug, Clone)]
        struct Car {
            name: &'static str,
        }

        impl Identify for Car {
            fn identifier(&self) -> Option<String> {
                Some(self.name.to_string())
            }
        }

        #[test]
        fn add_uses_self_identifier() {
            let cache = LfuCache::new(3);
            assert_eq!(cache.add(Car { name: "X" }).unwrap(), "X");
            assert!(cache.contains("X"));
        }

        #[test]
        fn add_duplicate_identifier_fails() {
            let cache = LfuCache::new(3);
            cache.add(Car { name: "X" }).unwrap();
            let err = cache.add(Car { name: "X" }).unwrap_err();
            assert_eq!(err, ContainerError::duplicate("X"));
        }

        #[test]
        fn add_generates_unique_ids() {
            let cache = LfuCache::new(0);
            let ids: HashSet<String> = (0..100).map(|i| cache.add(i).unwrap()).collect();
            assert_eq!(ids.len(), 100);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn display_lists_every_value() {
            let cache = filled(3, 3);
            let rendered = cache.to_string();
            assert!(rendered.starts_with('[') && rendered.ends_with(']'));

            let inner = &rendered[1..rendered.len() - 1];
            let mut parts: Vec<&str> = inner.split(',').collect();
            parts.sort_unstable();
            assert_eq!(parts, vec!["1", "2", "3"]);
        }

        #[test]
        fn empty_renders_brackets() {
            let cache: LfuCache<u8> = LfuCache::new(3);
            assert_eq!(cache.to_string(), "[]");
        }

        #[test]
        fn snapshot_is_idempotent() {
            let cache = filled(4, 4);
            assert_eq!(cache.snapshot(), cache.snapshot());
        }
    }
}
