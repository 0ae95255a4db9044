//! Bounded LIFO stack guarded by a reader/writer lock.
//!
//! The last value pushed is the first one popped. A `max_size` of `0` lets
//! the stack grow without limit.

use std::fmt;

use log::trace;
use parking_lot::RwLock;

use crate::error::{ContainerError, Result};
use crate::traits::ReadOnlyContainer;

/// Thread-safe LIFO stack with an optional size limit.
#[derive(Debug)]
pub struct BoundedStack<T> {
    inner: RwLock<Vec<T>>,
    max_size: usize,
}

impl<T> BoundedStack<T> {
    /// Create a stack holding at most `max_size` values (`0` = unbounded).
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            max_size,
        }
    }

    /// Pushes one value on top.
    ///
    /// Fails with [`ContainerError::Overflow`] when the stack is full.
    pub fn push(&self, value: T) -> Result<()> {
        self.push_all([value])
    }

    /// Pushes every value, last one ending on top.
    ///
    /// All or nothing: if the stack is already full, or the batch would not
    /// fit, nothing is pushed and [`ContainerError::Overflow`] is returned.
    pub fn push_all(&self, values: impl IntoIterator<Item = T>) -> Result<()> {
        let values: Vec<T> = values.into_iter().collect();
        let mut content = self.inner.write();

        if self.max_size > 0
            && (content.len() >= self.max_size || content.len() + values.len() > self.max_size)
        {
            trace!(
                "stack overflow: len={} batch={} max_size={}",
                content.len(),
                values.len(),
                self.max_size
            );
            return Err(ContainerError::Overflow);
        }

        content.extend(values);
        Ok(())
    }

    /// Removes and returns the top value.
    pub fn pop(&self) -> Result<T> {
        self.inner.write().pop().ok_or(ContainerError::Underflow)
    }

    /// Removes the top value without returning it.
    pub fn discard(&self) -> Result<()> {
        self.pop().map(|_| ())
    }

    /// Returns a copy of the top value.
    pub fn peek(&self) -> Result<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .last()
            .cloned()
            .ok_or(ContainerError::Underflow)
    }

    /// Copies the content, bottom first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().clone()
    }
}

impl<T> Default for BoundedStack<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> ReadOnlyContainer for BoundedStack<T> {
    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn capacity(&self) -> usize {
        self.max_size
    }
}

impl<T: fmt::Display> fmt::Display for BoundedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.inner.read();
        f.write_str("[")?;
        for (i, value) in content.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}
