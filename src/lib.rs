//! containerkit: thread-safe bounded containers and eviction-policy caches.
//!
//! - [`ds`]: bounded LIFO stack and FIFO queue
//! - [`store`]: plain key/value cache that rejects saves past capacity
//! - [`policy`]: LRU and LFU caches that evict instead of rejecting
//! - [`builder`]: one entry point for all of the above
//!
//! Every container guards its content with a single reader/writer lock, so
//! one instance can be shared across threads.

pub mod builder;
pub mod ds;
pub mod error;
pub mod identity;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;
