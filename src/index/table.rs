//! HashIndex implementation
//!
//! Double-hashing table with tombstones and proactive doubling.

use std::fmt;

use super::{probe, Key, Slot};
use crate::error::{Result, StoreError};
use crate::handle::Handle;

/// Closed hash table from record keys to handles
///
/// ## Slot lifecycle
/// ```text
/// Empty ──insert──▶ Full ──remove──▶ Tombstone ──insert──▶ Full
/// ```
/// A resize rehashes only `Full` slots; `Empty` and `Tombstone` slots are
/// dropped.
pub struct HashIndex {
    /// Slot array; its length is the capacity (a power of two)
    slots: Vec<Slot>,

    /// Number of `Full` slots
    len: usize,
}

impl HashIndex {
    /// Create an empty index with `capacity` slots
    ///
    /// `capacity` must be a power of two and at least 2.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 2 || !capacity.is_power_of_two() {
            return Err(StoreError::InvalidCapacity {
                what: "index",
                requested: capacity,
            });
        }

        Ok(Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
        })
    }

    /// Insert `key` with `handle`
    ///
    /// Returns `false` if `key` is already present. When the insert would
    /// bring the load to one half, the table doubles first, unless the key
    /// is a duplicate, in which case nothing changes.
    pub fn insert(&mut self, key: Key, handle: Handle) -> bool {
        if (self.len + 1) * 2 >= self.capacity() {
            if self.contains(key) {
                return false;
            }
            self.resize();
        }

        let mut insertion_point = None;
        for index in probe(key, self.capacity()) {
            match self.slots[index] {
                Slot::Empty => {
                    insertion_point.get_or_insert(index);
                    break;
                }
                Slot::Tombstone => {
                    insertion_point.get_or_insert(index);
                }
                Slot::Full { key: existing, .. } if existing == key => return false,
                Slot::Full { .. } => {}
            }
        }

        let Some(index) = insertion_point else {
            unreachable!("index below half load has no free slot for key {}", key);
        };

        self.slots[index] = Slot::Full { key, handle };
        self.len += 1;

        tracing::debug!(key, index, "index insert");
        true
    }

    /// Remove `key`, leaving a tombstone
    ///
    /// Returns `false` if `key` is absent.
    pub fn remove(&mut self, key: Key) -> bool {
        let Some(index) = self.index_of(key) else {
            return false;
        };

        self.slots[index] = Slot::Tombstone;
        self.len -= 1;

        tracing::debug!(key, index, "index remove");
        true
    }

    /// Handle stored under `key`
    pub fn get(&self, key: Key) -> Option<Handle> {
        self.index_of(key).and_then(|index| match self.slots[index] {
            Slot::Full { handle, .. } => Some(handle),
            _ => None,
        })
    }

    /// Whether `key` is present
    pub fn contains(&self, key: Key) -> bool {
        self.index_of(key).is_some()
    }

    /// Physical slot index holding `key`
    pub fn index_of(&self, key: Key) -> Option<usize> {
        for index in probe(key, self.capacity()) {
            match self.slots[index] {
                Slot::Empty => return None,
                Slot::Full { key: existing, .. } if existing == key => return Some(index),
                _ => {}
            }
        }
        None
    }

    /// Double the capacity and rehash every live entry
    ///
    /// The new table holds no tombstones and no duplicates, so each entry
    /// goes into the first empty slot of its probe sequence.
    pub fn resize(&mut self) {
        let new_capacity = self.capacity() * 2;
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::Empty; new_capacity]);

        for slot in old_slots {
            let Slot::Full { key, .. } = slot else {
                continue;
            };

            let Some(index) = probe(key, new_capacity).find(|&i| self.slots[i] == Slot::Empty)
            else {
                unreachable!("resized index has no empty slot for key {}", key);
            };
            self.slots[index] = slot;
        }

        tracing::info!(capacity = new_capacity, "index expanded");
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Non-empty slots in ascending physical order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot != Slot::Empty)
    }
}

impl fmt::Display for HashIndex {
    /// `<index>: <key>` for full slots, `<index>: TOMBSTONE` for tombstones,
    /// then the live key count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.iter() {
            match slot {
                Slot::Full { key, .. } => writeln!(f, "{}: {}", index, key)?,
                Slot::Tombstone => writeln!(f, "{}: TOMBSTONE", index)?,
                Slot::Empty => {}
            }
        }
        writeln!(f, "total records: {}", self.len)
    }
}

impl fmt::Debug for HashIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashIndex")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .finish()
    }
}
