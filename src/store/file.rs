//! Whole-file load and save of the people table.

use std::fs::{self, File};
use std::path::Path;
use std::time::Instant;

use log::{error, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tempfile::NamedTempFile;

use super::{codec, StoreError};
use crate::models::Table;

/// Load the table stored at `path`.
///
/// Never fails outright: a missing file yields an empty table, and any read or
/// decode problem is handed back next to an empty table so the caller can
/// report it and keep going.
pub fn load_table(path: &Path) -> (Table, Option<StoreError>) {
    let started_at = Instant::now();

    if let Err(err) = ensure_parent_dir(path) {
        error!(
            "event=table_load module=store status=error path={} error={err}",
            path.display()
        );
        return (Table::new(), Some(err));
    }

    if !path.exists() {
        info!(
            "event=table_load module=store status=missing path={}",
            path.display()
        );
        return (Table::new(), None);
    }

    match read_table(path) {
        Ok(table) => {
            info!(
                "event=table_load module=store status=ok path={} rows={} duration_ms={}",
                path.display(),
                table.len(),
                started_at.elapsed().as_millis()
            );
            (table, None)
        }
        Err(err) => {
            warn!(
                "event=table_load module=store status=error path={} duration_ms={} error={err}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            (Table::new(), Some(err))
        }
    }
}

fn read_table(path: &Path) -> Result<Table, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(codec::decode(&batch?)?);
    }

    Ok(Table::from_records(records))
}

/// Overwrite the file at `path` with the full table. The new contents are
/// written to a sibling temporary file first and renamed into place, so a
/// failed save leaves the previous file intact.
pub fn save_table(table: &Table, path: &Path) -> Result<(), StoreError> {
    let started_at = Instant::now();

    let result = write_table(table, path);
    match &result {
        Ok(()) => info!(
            "event=table_save module=store status=ok path={} rows={} duration_ms={}",
            path.display(),
            table.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=table_save module=store status=error path={} duration_ms={} error={err}",
            path.display(),
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn write_table(table: &Table, path: &Path) -> Result<(), StoreError> {
    let dir = ensure_parent_dir(path)?;

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut staging = NamedTempFile::new_in(dir).map_err(write_err)?;

    let batch = codec::encode(table)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(staging.as_file_mut(), batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    staging.as_file().sync_all().map_err(write_err)?;
    staging
        .persist(path)
        .map_err(|err| StoreError::Persist {
            path: path.to_path_buf(),
            source: err.error,
        })?;

    Ok(())
}

/// Create the directory holding `path` if needed and return it. A bare file
/// name resolves to the current directory.
fn ensure_parent_dir(path: &Path) -> Result<&Path, StoreError> {
    match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            Ok(parent)
        }
        None => Ok(Path::new(".")),
    }
}
