//! Index Module
//!
//! Closed hash table mapping record keys to memory pool handles.
//!
//! ## Responsibilities
//! - Double-hashing open addressing over a power-of-two slot array
//! - Tombstones on removal so probe chains stay intact
//! - Proactive doubling before an insert would reach a load of one half
//!
//! ## Probe Sequence
//! For key `k` and capacity `M`:
//! ```text
//! home = k mod M
//! step = ((k div M) mod (M / 2)) * 2 + 1      (always odd)
//! home, home + step, home + 2*step, ...       (mod M)
//! ```
//! An odd step is coprime with a power-of-two `M`, so the first `M` probes
//! visit every slot exactly once.

mod table;

pub use table::HashIndex;

use crate::handle::Handle;

/// Record key type
pub type Key = u32;

/// A single slot in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    /// Never used, or vacated by a resize
    #[default]
    Empty,

    /// Holds a live key
    Full { key: Key, handle: Handle },

    /// Held a key that has been removed; still part of probe chains
    Tombstone,
}

/// Home slot of `key` in a table of `capacity` slots
pub fn home_slot(key: Key, capacity: usize) -> usize {
    key as usize % capacity
}

/// Probe step of `key` in a table of `capacity` slots
pub fn probe_step(key: Key, capacity: usize) -> usize {
    ((key as usize / capacity) % (capacity / 2)) * 2 + 1
}

/// Slot indices visited when probing for `key`, bounded to one full cycle
pub(crate) fn probe(key: Key, capacity: usize) -> impl Iterator<Item = usize> {
    let step = probe_step(key, capacity);
    let mask = capacity - 1;
    std::iter::successors(Some(home_slot(key, capacity)), move |&index| {
        Some((index + step) & mask)
    })
    .take(capacity)
}
