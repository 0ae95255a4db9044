//! # Container Trait Hierarchy
//!
//! Shared interfaces for the containers in this crate.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────────────────────────┐
//!              │          ReadOnlyContainer              │
//!              │                                         │
//!              │  len(&) → usize                         │
//!              │  capacity(&) → usize   (0 = unbounded)  │
//!              │  is_empty(&) → bool                     │
//!              │  is_unbounded(&) → bool                 │
//!              └──────────────────┬──────────────────────┘
//!                                 │
//!        ┌────────────────────────┼────────────────────────────┐
//!        │                        │                            │
//!        ▼                        ▼                            ▼
//!   BoundedStack<T>        BoundedQueue<T>            ┌─────────────────────────────┐
//!   KeyValueCache<T>                                  │        IdCache<T>           │
//!                                                     │                             │
//!                                                     │  get(&, id) → Option<T>     │
//!                                                     │  contains(&, id) → bool     │
//!                                                     │  add_by_id(&, id, T)        │
//!                                                     │  add(&, T) → id   (T: Identify)
//!                                                     │  snapshot(&) → HashMap      │
//!                                                     └──────────────┬──────────────┘
//!                                                                    │
//!                                                      ┌─────────────┴────────────┐
//!                                                      ▼                          ▼
//!                                                 LruCache<T>                LfuCache<T>
//! ```
//!
//! All methods take `&self`: every implementor guards its content with its
//! own reader/writer lock, so a single instance can be shared across threads
//! (behind an `Arc` or by cloning the handle).
//!
//! ## Identifier Assignment
//!
//! [`IdCache::add`] is provided once for every cache: the identifier comes
//! from [`Identify::identifier`] when the value has one, otherwise a UUID is
//! generated (see [`crate::identity`]). The work is then delegated to
//! [`IdCache::add_by_id`], so `add` inherits each policy's duplicate
//! semantics.
//!
//! ## Example Usage
//!
//! ```
//! use containerkit::policy::lru::LruCache;
//! use containerkit::traits::{IdCache, ReadOnlyContainer};
//!
//! fn warm<C: IdCache<String>>(cache: &C, words: &[&str]) {
//!     for w in words {
//!         cache.add_by_id(*w, w.to_string()).unwrap();
//!     }
//! }
//!
//! let cache = LruCache::new(2);
//! warm(&cache, &["a", "b", "c"]);
//! assert_eq!(cache.len(), 2);
//! assert!(!cache.contains("a"));
//! ```

use std::collections::HashMap;

use crate::error::Result;
use crate::identity::{Identify, resolve_id};

/// Size queries shared by every container.
pub trait ReadOnlyContainer {
    /// Current number of stored elements.
    fn len(&self) -> usize;

    /// Configured maximum size. `0` means unbounded.
    fn capacity(&self) -> usize;

    /// Returns `true` when nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when no capacity limit applies.
    fn is_unbounded(&self) -> bool {
        self.capacity() == 0
    }
}

/// Keyed caches addressed by string identifiers.
pub trait IdCache<T>: ReadOnlyContainer {
    /// Returns a copy of the value stored under `id`.
    fn get(&self, id: &str) -> Option<T>;

    /// Checks whether `id` is stored, without side effects.
    fn contains(&self, id: &str) -> bool;

    /// Stores `value` under `id` following the cache's eviction policy.
    fn add_by_id(&self, id: impl Into<String>, value: T) -> Result<()>;

    /// Returns an independent copy of the content, keyed by identifier.
    fn snapshot(&self) -> HashMap<String, T>;

    /// Stores `value` under its own identifier or a generated one.
    ///
    /// Returns the identifier that was assigned. On failure the error is
    /// whatever [`add_by_id`](Self::add_by_id) returned.
    fn add(&self, value: T) -> Result<String>
    where
        T: Identify,
    {
        let id = resolve_id(&value);
        self.add_by_id(id.clone(), value)?;
        Ok(id)
    }
}
