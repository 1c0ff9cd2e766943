//! The owning record store: one table, one file, write-through on mutation.

use std::path::{Path, PathBuf};

use log::warn;

use super::{load_table, save_table, StoreError};
use crate::models::{Record, Table};
use crate::ops::{self, ValidationError};

/// What happened to the data file after a mutation.
#[derive(Debug)]
pub enum Persistence {
    Saved,
    /// Nothing changed, so nothing was written.
    Skipped,
    /// The write failed. The in-memory table still holds the change.
    Failed(StoreError),
}

/// Result of a mutating call: how many rows were touched plus the save result.
#[derive(Debug)]
pub struct Outcome {
    pub affected: usize,
    pub persistence: Persistence,
}

impl Outcome {
    pub fn save_error(&self) -> Option<&StoreError> {
        match &self.persistence {
            Persistence::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Owns the people table for the lifetime of the process together with the
/// path it is persisted to. Every successful mutation is written straight
/// back to disk.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    table: Table,
}

impl RecordStore {
    /// Open the store at `path`, loading whatever is there. A load failure is
    /// returned alongside a store holding an empty table.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let path = path.into();
        let (table, err) = load_table(&path);
        (Self { path, table }, err)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot. Callers re-read this after every mutation instead of
    /// keeping their own copy.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Validate and insert a record, keeping the table sorted by last name.
    pub fn add(
        &mut self,
        last_name: &str,
        first_name: &str,
        phone: &str,
        birth_date: &str,
    ) -> Result<Outcome, ValidationError> {
        self.table = ops::add_record(&self.table, last_name, first_name, phone, birth_date)?;
        Ok(Outcome {
            affected: 1,
            persistence: self.persist(),
        })
    }

    /// Remove every record with exactly this last name. When nothing matches
    /// the file is left untouched.
    pub fn delete_by_last_name(&mut self, last_name: &str) -> Outcome {
        let deletion = ops::delete_by_last_name(&self.table, last_name);
        if !deletion.found() {
            return Outcome {
                affected: 0,
                persistence: Persistence::Skipped,
            };
        }

        self.table = deletion.table;
        Outcome {
            affected: deletion.removed,
            persistence: self.persist(),
        }
    }

    pub fn filter_by_month(&self, month: u32) -> Result<Vec<Record>, ValidationError> {
        ops::filter_by_month(&self.table, month)
    }

    /// Write the current table to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        save_table(&self.table, &self.path)
    }

    fn persist(&self) -> Persistence {
        match self.save() {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                warn!(
                    "event=table_save module=store status=diverged rows={} path={}",
                    self.table.len(),
                    self.path.display()
                );
                Persistence::Failed(err)
            }
        }
    }
}
