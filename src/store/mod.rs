pub mod kv;

pub use kv::{KeyValueCache, KvMetrics};
