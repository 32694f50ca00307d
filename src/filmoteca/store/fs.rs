use super::CatalogStore;
use crate::backup::{tmp_sibling, BackupManager, BackupTag};
use crate::error::{CatalogError, Result};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// CSV-file backend.
///
/// Rows are comma-separated, double-quote quoted with doubled-quote
/// escaping, no header. The reader is flexible: ragged rows (shorter or
/// longer than the schema width) are carried through untouched rather than
/// rejected, matching how the catalog has always been handled.
pub struct FileStore {
    path: PathBuf,
    backups: BackupManager,
}

impl FileStore {
    pub fn new(path: PathBuf, backup_dir: PathBuf) -> Self {
        let backups = BackupManager::new(path.clone(), backup_dir);
        Self { path, backups }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(Record::new(row.iter().map(str::to_string).collect()));
        }
        Ok(records)
    }
}

impl CatalogStore for FileStore {
    fn read(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        self.read_file()
    }

    fn read_required(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Err(CatalogError::CatalogMissing(self.path.clone()));
        }
        self.read_file()
    }

    /// Full rewrite through a temp file in the same directory plus a rename,
    /// so a crash mid-write cannot leave a half-written catalog behind.
    fn write(&mut self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = tmp_sibling(&self.path);
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&tmp)?;
            for record in records {
                writer.write_record(&record.fields)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn snapshot(&mut self, tag: BackupTag) -> Result<Option<PathBuf>> {
        self.backups.create(tag)
    }
}
