//! Handle definition
//!
//! A handle is a plain `(address, length)` pair naming a stored byte range
//! inside the memory pool. It owns nothing: the bytes live until the handle
//! is passed to [`BuddyAllocator::free`](crate::memory::BuddyAllocator::free).
//! "No handle" is expressed as `Option<Handle>::None`.

use std::fmt;

/// Capability to a byte range in the memory pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Starting byte address in the pool
    pub address: usize,

    /// Logical length of the record in bytes (not the rounded block size)
    pub length: usize,
}

impl Handle {
    pub fn new(address: usize, length: usize) -> Self {
        Self { address, length }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.address, self.length)
    }
}
