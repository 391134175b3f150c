//! Whole-file CSV table with atomic rewrites.
//!
//! Collections are small (a few thousand rows at most), so every mutation
//! reads the whole file, changes it in memory and writes a temp file that is
//! renamed over the original.
//!
//! Every read-modify-write runs under the collection lock handed out by
//! [`super::connection::CsvConnection`], so concurrent writers never drop each
//! other's rows. Temp files are unique per write.

use anyhow::{Context, Result};
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CsvTable<R> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _row: PhantomData<fn() -> R>,
}

impl<R> CsvTable<R>
where
    R: Serialize + DeserializeOwned,
{
    /// A table with its own lock. Only safe when nothing else writes `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_lock(path, Arc::new(Mutex::new(())))
    }

    /// A table guarded by a lock shared with every other handle on `path`
    pub fn with_lock(path: PathBuf, lock: Arc<Mutex<()>>) -> Self {
        Self {
            path,
            lock,
            _row: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read every row. A missing file is an empty table.
    pub fn read_all(&self) -> Result<Vec<R>> {
        let _guard = self.lock();
        self.read_rows()
    }

    /// Replace the table contents atomically
    pub fn write_all(&self, rows: &[R]) -> Result<()> {
        let _guard = self.lock();
        self.write_rows(rows)
    }

    pub fn append(&self, row: R) -> Result<()> {
        let _guard = self.lock();
        let mut rows = self.read_rows()?;
        rows.push(row);
        self.write_rows(&rows)
    }

    /// Read, change and rewrite the table under one lock.
    ///
    /// The table is rewritten only when `change` returns `Some`.
    pub fn modify<T, F>(&self, change: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Vec<R>) -> Option<T>,
    {
        let _guard = self.lock();
        let mut rows = self.read_rows()?;
        let outcome = change(&mut rows);
        if outcome.is_some() {
            self.write_rows(&rows)?;
        }
        Ok(outcome)
    }

    fn read_rows(&self) -> Result<Vec<R>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut reader = ::csv::Reader::from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: R = result
                .with_context(|| format!("Malformed row in {}", self.path.display()))?;
            rows.push(row);
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[R]) -> Result<()> {
        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = Self::write_temp(&temp_path, rows) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        debug!("Wrote {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }

    fn write_temp(temp_path: &Path, rows: &[R]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)
            .with_context(|| format!("Failed to open {}", temp_path.display()))?;
        let mut writer = ::csv::Writer::from_writer(BufWriter::new(file));
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        amount: f64,
        notes: Option<String>,
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let table: CsvTable<Row> = CsvTable::new(temp_dir.path().join("rows.csv"));
        assert!(table.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_keeps_existing_rows_and_optional_fields() {
        let temp_dir = TempDir::new().unwrap();
        let table: CsvTable<Row> = CsvTable::new(temp_dir.path().join("rows.csv"));

        table
            .append(Row { id: "a".to_string(), amount: 1.5, notes: None })
            .unwrap();
        table
            .append(Row { id: "b".to_string(), amount: -2.0, notes: Some("with, comma".to_string()) })
            .unwrap();

        let rows = table.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].notes, None);
        assert_eq!(rows[1].notes.as_deref(), Some("with, comma"));

        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec!["rows.csv"]);
    }

    #[test]
    fn test_write_all_with_no_rows_empties_table() {
        let temp_dir = TempDir::new().unwrap();
        let table: CsvTable<Row> = CsvTable::new(temp_dir.path().join("rows.csv"));
        table
            .append(Row { id: "a".to_string(), amount: 1.0, notes: None })
            .unwrap();

        table.write_all(&[]).unwrap();

        assert!(table.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_modify_rewrites_only_on_change() {
        let temp_dir = TempDir::new().unwrap();
        let table: CsvTable<Row> = CsvTable::new(temp_dir.path().join("rows.csv"));
        table
            .append(Row { id: "a".to_string(), amount: 1.0, notes: None })
            .unwrap();

        let missing = table
            .modify(|rows| rows.iter().position(|r| r.id == "zzz").map(|i| rows.remove(i)))
            .unwrap();
        assert!(missing.is_none());

        let removed = table
            .modify(|rows| rows.iter().position(|r| r.id == "a").map(|i| rows.remove(i)))
            .unwrap();
        assert_eq!(removed.map(|r| r.id), Some("a".to_string()));
        assert!(table.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_appends_on_shared_lock_keep_every_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        let lock = Arc::new(Mutex::new(()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let table: CsvTable<Row> = CsvTable::with_lock(path.clone(), lock.clone());
                std::thread::spawn(move || {
                    table
                        .append(Row { id: format!("row-{}", i), amount: i as f64, notes: None })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let table: CsvTable<Row> = CsvTable::with_lock(path, lock);
        assert_eq!(table.read_all().unwrap().len(), 16);
    }
}
