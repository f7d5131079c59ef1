//! # semdb
//!
//! A keyed record store built from two independent components:
//! - A buddy-system memory pool that grows by doubling
//! - A double-hashing index with tombstones that grows proactively
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command Processor                         │
//! │              (text command stream → report)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Seminar ⇄ bytes (bincode)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     RecordStore                              │
//! │             insert / delete / search / dump                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │  HashIndex  │          │ BuddyAllocator│
//!   │ key → Handle│          │  byte arena   │
//!   └─────────────┘          └──────────────┘
//! ```
//!
//! The index stores [`Handle`] values, which are plain `(address, length)`
//! pairs into the pool. Neither component depends on the other.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod handle;

pub mod memory;
pub mod index;
pub mod record;
pub mod command;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::StoreConfig;
pub use handle::Handle;
pub use index::{HashIndex, Key};
pub use memory::BuddyAllocator;
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of semdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
