//! Configuration for semdb
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a RecordStore instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Memory Pool Configuration
    // -------------------------------------------------------------------------
    /// Initial size of the memory pool in bytes.
    /// Rounded up to the next power of two by the allocator.
    pub initial_pool_size: usize,

    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Initial number of index slots (must be a power of two, at least 2)
    pub initial_index_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_pool_size: 512,
            initial_index_capacity: 4,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the initial memory pool size (in bytes)
    pub fn initial_pool_size(mut self, bytes: usize) -> Self {
        self.config.initial_pool_size = bytes;
        self
    }

    /// Set the initial index capacity (in slots)
    pub fn initial_index_capacity(mut self, slots: usize) -> Self {
        self.config.initial_index_capacity = slots;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
