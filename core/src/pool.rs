//! Object pooling utilities for allocation reuse.
//!
//! This module provides [`Pool<T>`], a small free list that keeps released
//! values around with their allocations intact. Meshes with varying topology
//! rebuild their topology every frame; recycling the previous frame's
//! topology keeps its `Vec` capacities instead of reallocating them.
//!
//! # Example
//!
//! ```
//! use meshsplit_core::pool::{Pool, Poolable};
//!
//! #[derive(Debug, Default)]
//! struct Scratch {
//!     data: Vec<u32>,
//! }
//!
//! impl Poolable for Scratch {
//!     fn new_empty() -> Self {
//!         Self::default()
//!     }
//!     fn reset(&mut self) {
//!         self.data.clear();
//!     }
//! }
//!
//! let mut pool = Pool::<Scratch>::new(2);
//! let mut scratch = pool.acquire();
//! scratch.data.extend_from_slice(&[1, 2, 3]);
//!
//! // Release back to the pool: cleared, capacity kept
//! pool.release(scratch);
//! let reused = pool.acquire();
//! assert!(reused.data.is_empty());
//! assert!(reused.data.capacity() >= 3);
//! ```

/// Trait for types that can be pooled and reused.
///
/// Implementors must be able to create an empty instance and clear their
/// contents while preserving allocated capacity.
pub trait Poolable {
    /// Create a new empty instance.
    fn new_empty() -> Self;

    /// Reset the value to an empty state, preserving allocated capacity.
    ///
    /// For example, call `Vec::clear()` rather than replacing with a new `Vec`.
    fn reset(&mut self);
}

/// A bounded free list of reusable values.
#[derive(Debug)]
pub struct Pool<T: Poolable> {
    free: Vec<T>,
    capacity: usize,
}

impl<T: Poolable> Pool<T> {
    /// Create a pool that keeps at most `capacity` released values.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Take a value from the pool, or create an empty one.
    pub fn acquire(&mut self) -> T {
        self.free.pop().unwrap_or_else(T::new_empty)
    }

    /// Reset `value` and keep it for reuse. Dropped if the pool is full.
    pub fn release(&mut self, mut value: T) {
        if self.free.len() < self.capacity {
            value.reset();
            self.free.push(value);
        }
    }

    /// Number of values waiting for reuse.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// True if no value is waiting for reuse.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Drop every pooled value.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new(1)
    }
}
