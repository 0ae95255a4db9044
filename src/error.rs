//! Error types for the containerkit library.
//!
//! ## Key Components
//!
//! - [`ContainerError`]: Returned by container operations that cannot be
//!   carried out (removing from an empty structure, inserting past a fixed
//!   capacity, or adding an identifier an LFU cache already holds).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! Which container raises which kind:
//!
//! | Kind        | Stack | Queue | Key/value cache | LRU | LFU |
//! |-------------|-------|-------|-----------------|-----|-----|
//! | `Underflow` | ✅    | ✅    | -               | -   | -   |
//! | `Overflow`  | ✅    | ✅    | ✅              | -   | -   |
//! | `Duplicate` | -     | -     | -               | -   | ✅  |
//!
//! LRU and LFU caches never overflow: they evict instead.
//!
//! ## Example Usage
//!
//! ```
//! use containerkit::ds::stack::BoundedStack;
//! use containerkit::error::ContainerError;
//!
//! let stack: BoundedStack<i32> = BoundedStack::new(1);
//! assert_eq!(stack.pop(), Err(ContainerError::Underflow));
//!
//! stack.push(1).unwrap();
//! assert_eq!(stack.push(2), Err(ContainerError::Overflow));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ContainerError
// ---------------------------------------------------------------------------

/// Error returned by container operations.
///
/// All variants are recoverable; nothing in the library retries on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Attempted removal from an empty bounded structure.
    Underflow,
    /// Attempted insertion beyond a fixed capacity.
    Overflow,
    /// The identifier is already present in the cache.
    Duplicate {
        /// The rejected identifier.
        id: String,
    },
}

impl ContainerError {
    /// Creates a [`ContainerError::Duplicate`] for the given identifier.
    #[inline]
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into() }
    }

    /// Returns `true` for [`ContainerError::Duplicate`].
    #[inline]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow => f.write_str("Underflow error"),
            Self::Overflow => f.write_str("Overflow error"),
            Self::Duplicate { id } => write!(f, "Duplicate error: {id}"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ContainerError>;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal container invariants are violated.
///
/// Produced by `check_invariants` methods on the cache cores
/// (e.g. [`LruCore::check_invariants`](crate::policy::lru::LruCore::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
