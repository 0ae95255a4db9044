//! Bounded FIFO queue guarded by a reader/writer lock.
//!
//! The first value pushed is the first one popped. A `max_size` of `0` lets
//! the queue grow without limit.

use std::collections::VecDeque;
use std::fmt;

use log::trace;
use parking_lot::RwLock;

use crate::error::{ContainerError, Result};
use crate::traits::ReadOnlyContainer;

/// Thread-safe FIFO queue with an optional size limit.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    inner: RwLock<VecDeque<T>>,
    max_size: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `max_size` values (`0` = unbounded).
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: RwLock::new(VecDeque::new()),
            max_size,
        }
    }

    /// Appends one value at the back.
    pub fn push(&self, value: T) -> Result<()> {
        self.push_all([value])
    }

    /// Appends every value in order.
    ///
    /// All or nothing, with the same overflow rule as
    /// [`BoundedStack::push_all`](crate::ds::stack::BoundedStack::push_all).
    pub fn push_all(&self, values: impl IntoIterator<Item = T>) -> Result<()> {
        let values: Vec<T> = values.into_iter().collect();
        let mut content = self.inner.write();

        if self.max_size > 0
            && (content.len() >= self.max_size || content.len() + values.len() > self.max_size)
        {
            trace!(
                "queue overflow: len={} batch={} max_size={}",
                content.len(),
                values.len(),
                self.max_size
            );
            return Err(ContainerError::Overflow);
        }

        content.extend(values);
        Ok(())
    }

    /// Removes and returns the front value.
    pub fn pop(&self) -> Result<T> {
        self.inner
            .write()
            .pop_front()
            .ok_or(ContainerError::Underflow)
    }

    /// Removes the front value without returning it.
    pub fn discard(&self) -> Result<()> {
        self.pop().map(|_| ())
    }

    /// Returns a copy of the front value.
    pub fn peek(&self) -> Result<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .front()
            .cloned()
            .ok_or(ContainerError::Underflow)
    }

    /// Copies the content, front first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().iter().cloned().collect()
    }
}

impl<T> Default for BoundedQueue<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> ReadOnlyContainer for BoundedQueue<T> {
    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn capacity(&self) -> usize {
        self.max_size
    }
}

impl<T: fmt::Display> fmt::Display for BoundedQueue<T> {
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
