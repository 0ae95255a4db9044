pub use crate::builder::{CacheBuilder, CachePolicy, EvictingCache};
pub use crate::ds::{BoundedQueue, BoundedStack};
pub use crate::error::{ContainerError, InvariantError};
pub use crate::identity::Identify;
pub use crate::policy::{LfuCache, LruCache};
pub use crate::store::KeyValueCache;
pub use crate::traits::{IdCache, ReadOnlyContainer};
