pub mod lfu;
pub mod lru;

pub use lfu::{LfuCache, LfuCore};
pub use lru::{LruCache, LruCore};
