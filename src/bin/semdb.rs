//! semdb Binary
//!
//! Runs a command file against a fresh record store and prints the report.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use semdb::command::CommandProcessor;
use semdb::{RecordStore, StoreConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// semdb record store
#[derive(Parser, Debug)]
#[command(name = "semdb")]
#[command(about = "Seminar record store with a buddy memory pool and a hashed index")]
#[command(version)]
struct Args {
    /// Initial memory pool size in bytes (rounded up to a power of two)
    initial_pool_size: usize,

    /// Initial index capacity in slots (power of two)
    initial_index_capacity: usize,

    /// Command file to execute
    command_file: PathBuf,
}

fn main() {
    // Logs go to stderr so the report on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("semdb v{}", semdb::VERSION);
    tracing::info!("Command file: {}", args.command_file.display());

    let config = StoreConfig::builder()
        .initial_pool_size(args.initial_pool_size)
        .initial_index_capacity(args.initial_index_capacity)
        .build();

    let store = match RecordStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut processor = CommandProcessor::new(store, BufWriter::new(stdout.lock()));

    let result = processor.run_file(&args.command_file);

    // Keep whatever was reported before a failure
    if let Err(e) = processor.into_output().flush() {
        tracing::warn!("Failed to flush report: {}", e);
    }

    if let Err(e) = result {
        tracing::error!("Command processing failed: {}", e);
        std::process::exit(1);
    }
}
