use crate::error::StoreError;
use crate::postprocess::KeyedRow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Every day captured so far, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub days: BTreeMap<String, Vec<KeyedRow>>,
}

impl Dataset {
    pub fn contains_day(&self, date: &str) -> bool {
        self.days.contains_key(date)
    }

    pub fn day(&self, date: &str) -> Option<&[KeyedRow]> {
        self.days.get(date).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Add a day's rows. An existing day is never overwritten.
    pub fn insert_day(mut self, date: &str, rows: Vec<KeyedRow>) -> Result<Dataset, StoreError> {
        if self.contains_day(date) {
            return Err(StoreError::DuplicateDate(date.to_string()));
        }
        self.days.insert(date.to_string(), rows);
        Ok(self)
    }
}

/// The JSON file holding the cumulative dataset.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset, or an empty one if nothing has been written yet.
    pub fn load(&self) -> Result<Dataset, StoreError> {
        if !self.path.exists() {
            log::info!("no existing data at {}, starting fresh", self.path.display());
            return Ok(Dataset::default());
        }

        // A file that exists but won't parse is fatal, not an empty dataset
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Where the current file would be moved before a write on `today`.
    /// Existing backups are skipped by appending `.1`, `.2`, ...
    pub fn backup_path(&self, today: NaiveDate) -> PathBuf {
        let mut core_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        // Backups sit next to the data file, e.g. data.json2017-04-03
        core_name.push(today.format("%Y-%m-%d").to_string());
        let core_backup = self.path.with_file_name(&core_name);

        // Don't override existing backups
        let mut backup = core_backup.clone();
        let mut attempt = 1;
        while backup.exists() {
            let mut name = core_name.clone();
            name.push(format!(".{}", attempt));
            backup = core_backup.with_file_name(name);
            attempt += 1;
        }
        backup
    }

    /// Move any existing file aside to a dated backup, then write the dataset.
    /// Returns the backup path when one was made.
    pub fn persist(
        &self,
        dataset: &Dataset,
        today: NaiveDate,
    ) -> Result<Option<PathBuf>, StoreError> {
        // Serialize before moving anything aside
        let json = serde_json::to_string_pretty(dataset)?;

        let backup = self.rotate(today)?;
        self.write(&json)?;

        Ok(backup)
    }

    /// Move the current file, if any, to its dated backup name.
    pub fn rotate(&self, today: NaiveDate) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let backup = self.backup_path(today);
        fs::rename(&self.path, &backup).map_err(|source| StoreError::Backup {
            from: self.path.clone(),
            to: backup.clone(),
            source,
        })?;
        log::info!("moved previous data to {}", backup.display());
        Ok(Some(backup))
    }

    fn write(&self, json: &str) -> Result<(), StoreError> {
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
