//! Buddy allocator implementation
//!
//! Growable byte arena partitioned into power-of-two blocks.

use std::fmt;

use bytes::BytesMut;

use super::{block_size, buddy_of, order_for};
use crate::error::{Result, StoreError};
use crate::handle::Handle;

/// Buddy-system memory manager
///
/// ## Invariants
/// - Capacity is always `2^top_order` bytes
/// - Free and allocated blocks tile `[0, capacity)` exactly
/// - `free_lists[k]` holds ascending start addresses of free `2^k` blocks
/// - No two addresses in one order are buddies (they merge eagerly)
pub struct BuddyAllocator {
    /// Backing storage; its length always equals the capacity
    arena: BytesMut,

    /// Order of the whole pool (`capacity == 2^top_order`)
    top_order: usize,

    /// Free block list indexed by order, `top_order + 1` entries
    free_lists: Vec<Vec<usize>>,
}

impl BuddyAllocator {
    /// Create a pool of at least `requested` bytes
    ///
    /// The capacity is rounded up to the next power of two. The new pool
    /// holds exactly one free block covering all of it.
    pub fn new(requested: usize) -> Result<Self> {
        if requested == 0 {
            return Err(StoreError::InvalidCapacity {
                what: "memory pool",
                requested,
            });
        }

        let top_order = order_for(requested);
        let mut free_lists = vec![Vec::new(); top_order + 1];
        free_lists[top_order].push(0);

        Ok(Self {
            arena: BytesMut::zeroed(block_size(top_order)),
            top_order,
            free_lists,
        })
    }

    /// Store `bytes` in the pool and return a handle to them
    ///
    /// Grows the pool until some free block of the target order or larger
    /// exists, splits down to the target order, then takes the free block
    /// with the lowest address.
    pub fn allocate(&mut self, bytes: &[u8]) -> Handle {
        let order = order_for(bytes.len());

        while !self.can_satisfy(order) {
            self.grow();
        }

        self.split_down_to(order);

        let address = self.free_lists[order].remove(0);
        self.arena[address..address + bytes.len()].copy_from_slice(bytes);

        tracing::debug!(
            address,
            length = bytes.len(),
            block = block_size(order),
            "allocated block"
        );

        Handle::new(address, bytes.len())
    }

    /// Return the block behind `handle` to the free list and merge buddies
    ///
    /// The block order is derived from `handle.length` exactly as in
    /// [`allocate`](Self::allocate). Freeing a handle that was not produced
    /// by this allocator, or freeing it twice, is a caller error.
    pub fn free(&mut self, handle: Handle) {
        let order = order_for(handle.length);
        debug_assert!(order <= self.top_order, "handle {} larger than pool", handle);
        debug_assert_eq!(
            handle.address % block_size(order),
            0,
            "handle {} is not block aligned",
            handle
        );

        insert_sorted(&mut self.free_lists[order], handle.address);
        tracing::debug!(address = handle.address, block = block_size(order), "freed block");

        self.merge();
    }

    /// Copy the stored bytes into `buf`
    ///
    /// `buf` must be exactly `handle.length` bytes long.
    pub fn read(&self, handle: Handle, buf: &mut [u8]) -> Result<()> {
        self.check_access(handle, buf.len())?;
        buf.copy_from_slice(&self.arena[handle.address..handle.address + handle.length]);
        Ok(())
    }

    /// Overwrite the stored bytes with `bytes`
    ///
    /// `bytes` must be exactly `handle.length` bytes long.
    pub fn write(&mut self, handle: Handle, bytes: &[u8]) -> Result<()> {
        self.check_access(handle, bytes.len())?;
        self.arena[handle.address..handle.address + handle.length].copy_from_slice(bytes);
        Ok(())
    }

    /// Read the stored bytes into a fresh buffer
    pub fn get(&self, handle: Handle) -> Result<Vec<u8>> {
        self.check_access(handle, handle.length)?;
        Ok(self.arena[handle.address..handle.address + handle.length].to_vec())
    }

    /// Double the pool
    ///
    /// Existing bytes are preserved. The appended half becomes one free block
    /// of the old top order, which merges with the lower half if that is
    /// entirely free.
    pub fn grow(&mut self) {
        let old_capacity = self.capacity();

        self.arena.resize(old_capacity * 2, 0);
        self.free_lists.push(Vec::new());
        insert_sorted(&mut self.free_lists[self.top_order], old_capacity);
        self.top_order += 1;

        tracing::info!(capacity = self.capacity(), "memory pool expanded");

        self.merge();
    }

    /// Whether a free block of `order` or larger exists
    pub fn can_satisfy(&self, order: usize) -> bool {
        self.free_lists.iter().skip(order).any(|list| !list.is_empty())
    }

    /// Total pool size in bytes
    pub fn capacity(&self) -> usize {
        block_size(self.top_order)
    }

    /// Order of the whole pool
    pub fn top_order(&self) -> usize {
        self.top_order
    }

    /// Total size of all free blocks in bytes
    pub fn free_bytes(&self) -> usize {
        self.free_lists
            .iter()
            .enumerate()
            .map(|(order, list)| list.len() * block_size(order))
            .sum()
    }

    /// Free blocks as `(block_size, address)`, by ascending size then address
    pub fn free_blocks(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.free_lists
            .iter()
            .enumerate()
            .flat_map(|(order, list)| list.iter().map(move |&address| (block_size(order), address)))
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Split the smallest free block of `order` or larger until a block of
    /// exactly `order` is free
    fn split_down_to(&mut self, order: usize) {
        let Some(source) = (order..=self.top_order).find(|&o| !self.free_lists[o].is_empty())
        else {
            unreachable!("no free block of order {} or above to split", order);
        };

        // Orders below `source` are empty, so the lowest address at each
        // step is the half we just produced.
        for current in (order + 1..=source).rev() {
            let address = self.free_lists[current].remove(0);
            let half = block_size(current - 1);

            let lower = &mut self.free_lists[current - 1];
            insert_sorted(lower, address);
            insert_sorted(lower, address + half);

            tracing::debug!(address, from = block_size(current), to = half, "split block");
        }
    }

    /// One ascending sweep over all orders below the top
    ///
    /// Each order's list is sorted, so a buddy pair is always adjacent. At
    /// most one pair can exist per order after a single free or grow; the
    /// merged block is checked again once the sweep reaches the next order.
    fn merge(&mut self) {
        for order in 0..self.top_order {
            let size = block_size(order);
            let list = &mut self.free_lists[order];

            let Some(i) = list
                .windows(2)
                .position(|pair| pair[1] == buddy_of(pair[0], size))
            else {
                continue;
            };

            let address = list[i];
            list.drain(i..=i + 1);
            insert_sorted(&mut self.free_lists[order + 1], address);

            tracing::debug!(address, block = size * 2, "merged buddies");
        }
    }

    fn check_access(&self, handle: Handle, len: usize) -> Result<()> {
        if handle.length != len {
            return Err(StoreError::LengthMismatch {
                expected: handle.length,
                actual: len,
            });
        }

        let past_end = handle
            .address
            .checked_add(handle.length)
            .map_or(true, |end| end > self.capacity());
        if past_end {
            return Err(StoreError::OutOfBounds {
                address: handle.address,
                length: handle.length,
                capacity: self.capacity(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for BuddyAllocator {
    /// One line per non-empty order: `<block size>: <addr> <addr> ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.free_lists.iter().all(Vec::is_empty) {
            return writeln!(f, "There are no freeblocks in the memory pool");
        }

        for (order, list) in self.free_lists.iter().enumerate() {
            if list.is_empty() {
                continue;
            }

            write!(f, "{}:", block_size(order))?;
            for address in list {
                write!(f, " {}", address)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for BuddyAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuddyAllocator")
            .field("capacity", &self.capacity())
            .field("free_lists", &self.free_lists)
            .finish()
    }
}

/// Insert `address` keeping `list` in ascending order
fn insert_sorted(list: &mut Vec<usize>, address: usize) {
    match list.binary_search(&address) {
        Ok(_) => debug_assert!(false, "block {} is already free", address),
        Err(pos) => list.insert(pos, address),
    }
}
