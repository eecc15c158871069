//! Append-only transaction store backed by a headerless CSV file.
//!
//! Each row holds `date,description,amount`. Rows are only ever appended;
//! nothing in this crate rewrites or truncates the file. Every operation
//! opens and closes the file itself, so no handle outlives a call.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LedgerError;
use crate::types::Record;

/// An iterator over the records of a store file.
///
/// Owns the CSV reader so records are decoded one at a time.
pub struct RecordReader {
    reader: csv::Reader<File>,
    path: PathBuf,
    row: csv::StringRecord,
}

/// Number of fields in a stored row.
const FIELDS: usize = 3;

/// Decodes one raw row and checks the record invariants.
fn decode_row(row: &csv::StringRecord) -> Result<Record, String> {
    if row.len() != FIELDS {
        return Err(format!("expected {FIELDS} fields, found {}", row.len()));
    }
    let record: Record = row.deserialize(None).map_err(|e| e.to_string())?;
    record.parsed_date().map_err(|e| e.to_string())?;
    if record.description.trim().is_empty() {
        return Err("the description is empty".into());
    }
    Ok(record)
}

impl Iterator for RecordReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let decoded = match self.reader.read_record(&mut self.row) {
            Ok(false) => return None,
            Ok(true) => {
                let line = self.row.position().map_or(0, |pos| pos.line());
                decode_row(&self.row).map_err(|reason| LedgerError::CorruptRecord { line, reason })
            }
            Err(e) if e.is_io_error() => {
                return Some(
                    Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
                );
            }
            Err(e) => {
                let line = e
                    .position()
                    .map_or_else(|| self.reader.position().line(), |pos| pos.line());
                Err(LedgerError::CorruptRecord {
                    line,
                    reason: e.to_string(),
                })
            }
        };
        Some(decoded.with_context(|| format!("Failed to read {}", self.path.display())))
    }
}

/// The persistent, append-only set of ledger records.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TransactionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, creating the file when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the row cannot be
    /// written and flushed.
    pub fn append(&self, record: &Record) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {} for append", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write record to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;

        info!(
            "Appended record dated {} to {}",
            record.date,
            self.path.display()
        );
        Ok(())
    }

    /// Opens the store for streaming reads.
    ///
    /// Returns `Ok(None)` when the backing file does not exist.
    pub fn reader(&self) -> Result<Option<RecordReader>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Store {} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open file: {}", self.path.display()));
            }
        };

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(file);

        Ok(Some(RecordReader {
            reader,
            path: self.path.clone(),
            row: csv::StringRecord::new(),
        }))
    }

    /// Reads every record in write order.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, and with a [`LedgerError::CorruptRecord`] (reachable
    /// through `downcast_ref`) on the first row that cannot be decoded.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        let Some(reader) = self.reader()? else {
            return Ok(Vec::new());
        };
        let records = reader.collect::<Result<Vec<_>>>()?;
        debug!(
            "Read {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
