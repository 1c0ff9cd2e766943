//! Persistence for the people table: a single Parquet file rewritten whole on
//! every change.

mod codec;
mod file;
mod record_store;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file::{load_table, save_table};
pub use record_store::{Outcome, Persistence, RecordStore};

/// Failures while reading or writing the data file. None of them are fatal;
/// callers report them and carry on with whatever table they hold.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to replace {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parquet encoding failed")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("arrow conversion failed")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("unexpected file layout: {0}")]
    Schema(String),
}
