//! Memory Pool Module
//!
//! Buddy-system memory manager for serialized records.
//!
//! ## Responsibilities
//! - Own the byte arena and hand out `(address, length)` handles into it
//! - Split larger free blocks down to the requested order
//! - Merge freed blocks with their buddies
//! - Double the pool when no free block is large enough
//!
//! ## Free Block List
//! ```text
//! order 0 (1 B)    │ 1
//! order 1 (2 B)    │ 2
//! ...
//! order k (2^k B)  │ a0 < a1 < ...   (ascending start addresses)
//! ...
//! order N (C B)    │ 0               (whole pool, when empty)
//! ```
//!
//! Every block starts at a multiple of its own size, so the buddy of the
//! block at `a` with size `s` is always at `a ^ s`.

mod buddy;

pub use buddy::BuddyAllocator;

/// Smallest order `k` such that `2^k >= size` (sizes 0 and 1 map to order 0)
pub fn order_for(size: usize) -> usize {
    size.max(1).next_power_of_two().trailing_zeros() as usize
}

/// Size in bytes of a block of the given order
pub fn block_size(order: usize) -> usize {
    1usize << order
}

/// Start address of the buddy of the block at `address` with `size` bytes
pub fn buddy_of(address: usize, size: usize) -> usize {
    address ^ size
}

/// Two blocks are buddies when they have the same size and differ only
/// in the bit of that size.
pub fn are_buddies(first: usize, first_size: usize, second: usize, second_size: usize) -> bool {
    first_size == second_size && buddy_of(first, first_size) == second
}
