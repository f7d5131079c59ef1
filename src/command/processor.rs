//! Command processor
//!
//! Executes parsed commands against a RecordStore and writes the report.

use std::fs;
use std::io::Write;
use std::path::Path;

use super::{parse_commands, Command};
use crate::error::{Result, StoreError};
use crate::record::Seminar;
use crate::store::RecordStore;

/// Runs commands and writes one report block per command to `out`
pub struct CommandProcessor<W: Write> {
    store: RecordStore,
    out: W,
}

impl<W: Write> CommandProcessor<W> {
    pub fn new(store: RecordStore, out: W) -> Self {
        Self { store, out }
    }

    /// Read, parse and execute a command file
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let input = fs::read_to_string(path)?;
        self.run(&input)
    }

    /// Parse and execute a command stream
    ///
    /// The whole stream is parsed first, so a malformed command runs nothing.
    pub fn run(&mut self, input: &str) -> Result<()> {
        for command in parse_commands(input)? {
            self.execute(command)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Execute a single command
    ///
    /// Duplicate inserts and absent keys are reported in the output, not
    /// returned as errors.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::trace!("Executing {}: {:?}", command.name(), command);

        match command {
            Command::Insert { record } => self.insert(record),
            Command::Delete { key } => match self.store.delete(key) {
                Ok(_) => {
                    writeln!(
                        self.out,
                        "Record with ID {} successfully deleted from the database",
                        key
                    )?;
                    Ok(())
                }
                Err(StoreError::KeyNotFound(_)) => {
                    writeln!(self.out, "Delete FAILED -- There is no record with ID {}", key)?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Search { key } => match self.store.search(key)? {
                Some(bytes) => {
                    let record = Seminar::from_bytes(&bytes)?;
                    writeln!(self.out, "Found record with ID {}:", key)?;
                    writeln!(self.out, "{}", record)?;
                    Ok(())
                }
                None => {
                    writeln!(self.out, "Search FAILED -- There is no record with ID {}", key)?;
                    Ok(())
                }
            },
            Command::PrintHashtable => {
                write!(self.out, "{}", self.store.dump_index())?;
                Ok(())
            }
            Command::PrintBlocks => {
                write!(self.out, "{}", self.store.dump_allocator())?;
                Ok(())
            }
        }
    }

    fn insert(&mut self, record: Seminar) -> Result<()> {
        let bytes = record.to_bytes()?;
        let pool_before = self.store.pool_capacity();
        let index_before = self.store.index_capacity();

        match self.store.insert(record.id, &bytes) {
            Ok(_) => {}
            Err(StoreError::DuplicateKey(id)) => {
                writeln!(
                    self.out,
                    "Insert FAILED - There is already a record with ID {}",
                    id
                )?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        // One line per doubling, pool first.
        let mut capacity = pool_before;
        while capacity < self.store.pool_capacity() {
            capacity *= 2;
            writeln!(self.out, "Memory pool expanded to {} bytes", capacity)?;
        }
        let mut capacity = index_before;
        while capacity < self.store.index_capacity() {
            capacity *= 2;
            writeln!(self.out, "Hash table expanded to {} records", capacity)?;
        }

        writeln!(self.out, "Successfully inserted record with ID {}", record.id)?;
        writeln!(self.out, "{}", record)?;
        writeln!(self.out, "Size: {}", bytes.len())?;
        Ok(())
    }

    /// The store being driven
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Consume the processor, returning the report sink
    pub fn into_output(self) -> W {
        self.out
    }
}
