use super::CatalogStore;
use crate::backup::BackupTag;
use crate::error::{CatalogError, Result};
use crate::model::Record;
use std::path::PathBuf;

/// In-memory backend for tests.
///
/// `records: None` models "the catalog file does not exist yet". Snapshots
/// are retained in order so tests can assert that the backup gate ran, and
/// ran before the write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Option<Vec<Record>>,
    pub snapshots: Vec<(BackupTag, Vec<Record>)>,
}

impl MemoryStore {
    /// A store with no catalog yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose catalog already holds `records`.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Some(records),
            snapshots: Vec::new(),
        }
    }

    pub fn records(&self) -> Option<&[Record]> {
        self.records.as_deref()
    }
}

impl CatalogStore for MemoryStore {
    fn read(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone().unwrap_or_default())
    }

    fn read_required(&self) -> Result<Vec<Record>> {
        self.records
            .clone()
            .ok_or_else(|| CatalogError::CatalogMissing(PathBuf::from("<memory>")))
    }

    fn write(&mut self, records: &[Record]) -> Result<()> {
        self.records = Some(records.to_vec());
        Ok(())
    }

    fn snapshot(&mut self, tag: BackupTag) -> Result<Option<PathBuf>> {
        if let Some(records) = &self.records {
            self.snapshots.push((tag, records.clone()));
        }
        Ok(None)
    }
}
