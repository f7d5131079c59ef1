//! Store Module
//!
//! The record store that coordinates the index and the memory pool.
//!
//! ## Responsibilities
//! - Reject duplicate keys before touching the pool
//! - Place record bytes in the pool and index the resulting handle
//! - Free pool blocks and drop index entries on delete
//! - Produce the diagnostic dumps of both components

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::handle::Handle;
use crate::index::{HashIndex, Key};
use crate::memory::BuddyAllocator;

/// Keyed record store
///
/// Single-threaded: every operation runs to completion, including any
/// growth of the pool or the index it triggers.
pub struct RecordStore {
    /// Store configuration
    config: StoreConfig,

    /// Key → handle index
    index: HashIndex,

    /// Memory pool holding serialized records
    pool: BuddyAllocator,
}

impl RecordStore {
    /// Create an empty store with the given config
    ///
    /// Fails if the index capacity is not a power of two (or is below 2),
    /// or if the pool size is zero.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let index = HashIndex::new(config.initial_index_capacity)?;
        let pool = BuddyAllocator::new(config.initial_pool_size)?;

        tracing::debug!(
            index_capacity = index.capacity(),
            pool_capacity = pool.capacity(),
            "record store opened"
        );

        Ok(Self {
            config,
            index,
            pool,
        })
    }

    /// Store `bytes` under `key`
    ///
    /// Steps:
    /// 1. Reject duplicates (nothing is allocated)
    /// 2. Allocate from the pool (may grow it)
    /// 3. Index the handle (may grow the index)
    pub fn insert(&mut self, key: Key, bytes: &[u8]) -> Result<Handle> {
        if self.index.contains(key) {
            return Err(StoreError::DuplicateKey(key));
        }

        let handle = self.pool.allocate(bytes);
        if !self.index.insert(key, handle) {
            unreachable!("key {} became a duplicate between check and insert", key);
        }

        Ok(handle)
    }

    /// Delete the record under `key`, returning the handle it occupied
    pub fn delete(&mut self, key: Key) -> Result<Handle> {
        let handle = self.index.get(key).ok_or(StoreError::KeyNotFound(key))?;

        self.pool.free(handle);
        self.index.remove(key);

        Ok(handle)
    }

    /// Read back the bytes stored under `key`
    pub fn search(&self, key: Key) -> Result<Option<Vec<u8>>> {
        match self.index.get(key) {
            Some(handle) => Ok(Some(self.pool.get(handle)?)),
            None => Ok(None),
        }
    }

    /// Index dump: a header, one line per non-empty slot, then the count
    pub fn dump_index(&self) -> String {
        format!("Hashtable:\n{}", self.index)
    }

    /// Free block list dump: a header, then one line per non-empty order
    pub fn dump_allocator(&self) -> String {
        format!("Freeblock List:\n{}", self.pool)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current number of index slots
    pub fn index_capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Current memory pool size in bytes
    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Read-only view of the index
    pub fn index(&self) -> &HashIndex {
        &self.index
    }

    /// Read-only view of the memory pool
    pub fn pool(&self) -> &BuddyAllocator {
        &self.pool
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
