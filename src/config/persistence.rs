//! Exercise records persistence
//!
//! Handles saving, loading, and rotation of completed exercise records.

use crate::models::ExerciseRecord;
use crate::{ExploreError, Result, APP_NAME, MAX_RECORDS_HISTORY, RECORDS_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Records storage manager
#[derive(Debug)]
pub struct RecordsStorage {
    records_path: PathBuf,
}

/// Records file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct RecordsFile {
    version: u32,
    records: Vec<ExerciseRecord>,
}

impl RecordsStorage {
    /// Create a storage manager at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self::at(Self::records_file_path()?))
    }

    /// Create a storage manager for a specific file
    pub fn at(records_path: PathBuf) -> Self {
        Self { records_path }
    }

    /// Get the standard records file path
    /// Uses $DATA_HOME/explore-keys/records.json
    pub fn records_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            ExploreError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(RECORDS_FILE))
    }

    /// Load all records from the records file
    pub fn load_records(&self) -> Result<Vec<ExerciseRecord>> {
        if !self.records_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.records_path).map_err(|e| {
            ExploreError::PersistenceError(format!(
                "Failed to read records file {}: {}",
                self.records_path.display(),
                e
            ))
        })?;

        let records_file: RecordsFile = serde_json::from_str(&content).map_err(|e| {
            ExploreError::PersistenceError(format!(
                "Failed to parse records file {}: {}",
                self.records_path.display(),
                e
            ))
        })?;

        Ok(records_file.records)
    }

    /// Append a record, keeping only the newest MAX_RECORDS_HISTORY entries
    pub fn append_record(&self, record: ExerciseRecord) -> Result<()> {
        let mut records = self.load_records()?;
        records.push(record);

        if records.len() > MAX_RECORDS_HISTORY {
            let skip_count = records.len() - MAX_RECORDS_HISTORY;
            records.drain(..skip_count);
        }

        self.save_records(records)
    }

    fn save_records(&self, records: Vec<ExerciseRecord>) -> Result<()> {
        if let Some(parent) = self.records_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ExploreError::PersistenceError(format!(
                    "Failed to create records directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let records_file = RecordsFile {
            version: 1,
            records,
        };
        let content = serde_json::to_string_pretty(&records_file)?;

        fs::write(&self.records_path, content).map_err(|e| {
            ExploreError::PersistenceError(format!(
                "Failed to write records file {}: {}",
                self.records_path.display(),
                e
            ))
        })?;

        tracing::debug!("Saved {} records", records_file.records.len());
        Ok(())
    }

    /// Get the most recent N records, oldest first
    pub fn get_recent_records(&self, count: usize) -> Result<Vec<ExerciseRecord>> {
        let mut records = self.load_records()?;
        if records.len() > count {
            records.drain(..records.len() - count);
        }
        Ok(records)
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }
}
