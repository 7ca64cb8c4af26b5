//! JSON storage for reading plan progress
//!
//! Progress is a single small JSON document. Access is serialized through a
//! sidecar `<file>.lock`: reads hold it shared, while `save` and the whole
//! read-modify-write of `update` hold it exclusively. Writes go through a
//! temp file that is renamed into place.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::PlanProgress;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Progress file is corrupt: {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Store for plan progress in a JSON file
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Creates a store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the sidecar lock file
    pub fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let lock_path = self.lock_path();
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))
    }

    /// Reads progress, or a fresh value if nothing has been saved yet
    pub fn load(&self) -> Result<PlanProgress> {
        if !self.path.exists() {
            return Ok(PlanProgress::new());
        }

        let lock = self.open_lock()?;
        lock.lock_shared()
            .context("Failed to acquire read lock on progress file")?;

        self.read_locked()
    }

    /// Writes progress, replacing the previous file atomically
    pub fn save(&self, progress: &PlanProgress) -> Result<()> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .context("Failed to acquire write lock on progress file")?;

        self.write_locked(progress)
    }

    /// Loads, applies `f`, and saves while holding the write lock throughout
    pub fn update<T>(&self, f: impl FnOnce(&mut PlanProgress) -> T) -> Result<(PlanProgress, T)> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .context("Failed to acquire write lock on progress file")?;

        let mut progress = self.read_locked()?;
        let result = f(&mut progress);
        self.write_locked(&progress)?;
        Ok((progress, result))
    }

    fn read_locked(&self) -> Result<PlanProgress> {
        if !self.path.exists() {
            return Ok(PlanProgress::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open progress file: {}", self.path.display()))?;

        let reader = BufReader::new(file);
        let progress: PlanProgress = serde_json::from_reader(reader).map_err(|e| ProgressError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(progress)
    }

    fn write_locked(&self, progress: &PlanProgress) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, progress)
                .context("Failed to serialize progress")?;
            writeln!(writer).context("Failed to write progress")?;
            writer.flush().context("Failed to flush progress file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn read_missing_store() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));

        assert_eq!(store.load().unwrap(), PlanProgress::new());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));

        let mut progress = PlanProgress::new();
        progress.start(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        progress.mark_completed(1);
        progress.mark_completed(2);
        store.save(&progress).unwrap();

        assert_eq!(store.load().unwrap(), progress);
    }

    #[test]
    fn update_persists() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));

        let (_, inserted) = store.update(|p| p.mark_completed(7)).unwrap();
        assert!(inserted);
        let (progress, inserted) = store.update(|p| p.mark_completed(7)).unwrap();
        assert!(!inserted);
        assert!(progress.is_completed(7));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();

        let err = ProgressStore::new(&path).load().unwrap_err();
        assert!(err.downcast_ref::<ProgressError>().is_some());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("nested").join("progress.json"));

        store.save(&PlanProgress::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));

        store.save(&PlanProgress::new()).unwrap();

        let temp_path = store.path().with_extension("json.tmp");
        assert!(!temp_path.exists());
        assert!(store.lock_path().exists());
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");

        let handles: Vec<_> = (1..=8)
            .map(|day| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store = ProgressStore::new(path);
                    for offset in 0..5 {
                        store.update(|p| p.mark_completed(day + offset * 8)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let progress = ProgressStore::new(&path).load().unwrap();
        assert_eq!(progress.completed_count(), 40);
        assert!((1..=40).all(|day| progress.is_completed(day)));
    }
}
