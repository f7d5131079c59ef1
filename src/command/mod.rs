//! Command Module
//!
//! Text command stream driving a record store.
//!
//! ## Command Format
//! ```text
//! insert <id>
//! <title>
//! <date> <length> <x> <y> <cost>
//! <keyword> <keyword> ...
//! <description>
//! delete <id>
//! search <id>
//! print hashtable
//! print blocks
//! ```
//! Blank lines are ignored and tokens may be separated by any whitespace.

mod parser;
mod processor;

pub use parser::parse_commands;
pub use processor::CommandProcessor;

use crate::index::Key;
use crate::record::Seminar;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a record under its own id
    Insert { record: Seminar },

    /// Delete the record with the given key
    Delete { key: Key },

    /// Look up and print the record with the given key
    Search { key: Key },

    /// Print the index dump
    PrintHashtable,

    /// Print the free block list dump
    PrintBlocks,
}

impl Command {
    /// Command keyword, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert { .. } => "insert",
            Command::Delete { .. } => "delete",
            Command::Search { .. } => "search",
            Command::PrintHashtable => "print hashtable",
            Command::PrintBlocks => "print blocks",
        }
    }
}
