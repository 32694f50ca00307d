//! Storage for the catalog file.
//!
//! The catalog is always handled at full-file granularity: every operation
//! loads the whole record sequence, works on it in memory, and writes the
//! whole thing back. [`CatalogStore`] abstracts that so command logic can be
//! tested against [`memory::MemoryStore`] without a filesystem, while
//! [`fs::FileStore`] is the production backend.
//!
//! The snapshot gate lives on the trait too: commands that write first ask
//! the store to snapshot, so "backup precedes write" is testable in memory.

use crate::backup::BackupTag;
use crate::error::Result;
use crate::model::Record;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub trait CatalogStore {
    /// Read the catalog, treating an absent file as empty. Add uses this to
    /// bootstrap a brand-new catalog.
    fn read(&self) -> Result<Vec<Record>>;

    /// Read the catalog, failing when the file does not exist. Delete and
    /// Rate have nothing sensible to do without one.
    fn read_required(&self) -> Result<Vec<Record>>;

    /// Replace the catalog contents in full.
    fn write(&mut self, records: &[Record]) -> Result<()>;

    /// Snapshot the live catalog before a destructive write. Returns the
    /// snapshot path when one was taken, `None` when there was nothing to
    /// snapshot yet.
    fn snapshot(&mut self, tag: BackupTag) -> Result<Option<PathBuf>>;
}
