//! Seminar records
//!
//! The record type stored in the pool. The core only ever sees the
//! serialized bytes produced here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::index::Key;

/// A seminar record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seminar {
    pub id: Key,
    pub title: String,
    /// Date and time as written in the command stream (e.g. `0610051600`)
    pub date: String,
    /// Duration in minutes
    pub length: u32,
    pub x: i16,
    pub y: i16,
    pub cost: u32,
    pub keywords: Vec<String>,
    pub description: String,
}

impl Seminar {
    /// Encode the record with bincode
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode a record previously produced by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl fmt::Display for Seminar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}, Title: {}", self.id, self.title)?;
        writeln!(
            f,
            "Date: {}, Length: {}, X: {}, Y: {}, Cost: {}",
            self.date, self.length, self.x, self.y, self.cost
        )?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Keywords: {}", self.keywords.join(", "))
    }
}
