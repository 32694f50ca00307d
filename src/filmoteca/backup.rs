//! Snapshots of the catalog file.
//!
//! Backups live in a sibling directory of the catalog, are named
//! `<basename>.<tag>.<YYYYMMDDHHMMSS>`, and are never touched again after
//! creation. Enumeration is ordered by modification time; the 1-based index
//! shown in listings is a lookup convenience, never persisted.

use crate::error::{CatalogError, Result};
use chrono::{DateTime, Local};
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};

/// Why a snapshot was taken; becomes part of the filename.
///
/// Existing backup directories may also contain `pre_migrate` files from the
/// one-time column migration; they list and resolve like any other backup,
/// but nothing here creates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTag {
    Bak,
    PreRestore,
}

impl BackupTag {
    pub fn as_str(self) -> &'static str {
        match self {
            BackupTag::Bak => "bak",
            BackupTag::PreRestore => "pre_restore",
        }
    }
}

impl std::fmt::Display for BackupTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `backup list` output.
#[derive(Debug, Clone)]
pub struct BackupEntry {
    /// 1-based position in mtime order.
    pub index: usize,
    pub name: String,
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub size: u64,
}

pub struct BackupManager {
    catalog: PathBuf,
    dir: PathBuf,
}

impl BackupManager {
    pub fn new(catalog: PathBuf, dir: PathBuf) -> Self {
        Self { catalog, dir }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy the live catalog into the backup directory under a fresh
    /// timestamped name. Returns `None` when there is no catalog yet
    /// (nothing to snapshot, e.g. the very first add).
    pub fn create(&self, tag: BackupTag) -> Result<Option<PathBuf>> {
        if !self.catalog.exists() {
            return Ok(None);
        }
        fs::create_dir_all(&self.dir)?;

        let basename = self
            .catalog
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.csv".to_string());
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let dest = self.dir.join(format!("{}.{}.{}", basename, tag, stamp));
        fs::copy(&self.catalog, &dest)?;
        Ok(Some(dest))
    }

    /// Every file in the backup directory, oldest first. An absent directory
    /// is an empty listing, not an error.
    pub fn list(&self) -> Result<Vec<BackupEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for dirent in fs::read_dir(&self.dir)? {
            let dirent = dirent?;
            let path = dirent.path();
            if !path.is_file() {
                continue;
            }
            let meta = dirent.metadata()?;
            entries.push(BackupEntry {
                index: 0,
                name: dirent.file_name().to_string_lossy().into_owned(),
                path,
                modified: meta.modified()?.into(),
                size: meta.len(),
            });
        }

        // mtime can tie within one clock tick; the name breaks the tie so
        // index resolution stays stable
        entries.sort_by(|a, b| (a.modified, &a.name).cmp(&(b.modified, &b.name)));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.index = i + 1;
        }
        Ok(entries)
    }

    /// Turn a user token into a backup path: an all-digits token is a
    /// 1-based index into [`list`](Self::list) order, anything else a
    /// literal filename under the backup directory.
    pub fn resolve(&self, token: &str) -> Result<PathBuf> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            let entries = self.list()?;
            let i: usize = token
                .parse()
                .map_err(|_| CatalogError::IndexOutOfRange(token.to_string()))?;
            if i == 0 || i > entries.len() {
                return Err(CatalogError::IndexOutOfRange(token.to_string()));
            }
            return Ok(entries[i - 1].path.clone());
        }

        let path = self.dir.join(token);
        if path.exists() {
            Ok(path)
        } else {
            Err(CatalogError::BackupNotFound(token.to_string()))
        }
    }

    /// Unified line diff between two resolved files, hunk headers included.
    pub fn diff(&self, a: &Path, b: &Path) -> Result<String> {
        let old = fs::read_to_string(a)?;
        let new = fs::read_to_string(b)?;
        let text = TextDiff::from_lines(&old, &new)
            .unified_diff()
            .context_radius(3)
            .header(&a.display().to_string(), &b.display().to_string())
            .to_string();
        Ok(text)
    }

    /// Copy a backup over the live catalog. The confirmation gate and the
    /// optional pre-restore snapshot happen before this is called.
    pub fn restore(&self, src: &Path) -> Result<()> {
        if !src.exists() {
            return Err(CatalogError::BackupNotFound(
                src.display().to_string(),
            ));
        }
        copy_over(src, &self.catalog)
    }

    /// Permanently remove a backup file. Irreversible.
    pub fn delete(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(CatalogError::BackupNotFound(path.display().to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Replace `dst` with the contents of `src` via a temp file in the same
/// directory and a rename, so a crash mid-copy cannot leave `dst` truncated.
fn copy_over(src: &Path, dst: &Path) -> Result<()> {
    let tmp = tmp_sibling(dst);
    fs::copy(src, &tmp)?;
    fs::rename(&tmp, dst)?;
    Ok(())
}

pub(crate) fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}

/// Bytes as a short human-readable string, one decimal above bytes.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["bytes", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 || unit == "TB" {
            if unit == "bytes" {
                return format!("{} {}", bytes, unit);
            }
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &Path) -> BackupManager {
        BackupManager::new(dir.join("data.csv"), dir.join("backups"))
    }

    #[test]
    fn create_names_backup_with_tag_and_stamp() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        fs::write(mgr.catalog_path(), "tt1,Matrix\n").unwrap();

        let path = mgr.create(BackupTag::Bak).unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("data.csv.bak."), "got {}", name);
        let stamp = name.rsplit('.').next().unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(fs::read_to_string(path).unwrap(), "tt1,Matrix\n");
    }

    #[test]
    fn create_without_catalog_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        assert!(mgr.create(BackupTag::Bak).unwrap().is_none());
        assert!(!mgr.dir().exists());
    }

    #[test]
    fn list_is_ordered_and_indexed_from_one() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        fs::create_dir_all(mgr.dir()).unwrap();
        fs::write(mgr.dir().join("data.csv.bak.20240101000000"), "a\n").unwrap();
        fs::write(mgr.dir().join("data.csv.bak.20240102000000"), "bb\n").unwrap();

        let entries = mgr.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].name, "data.csv.bak.20240101000000");
        assert_eq!(entries[1].index, 2);
        assert_eq!(entries[1].size, 3);
    }

    #[test]
    fn list_without_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(manager(tmp.path()).list().unwrap().is_empty());
    }

    #[test]
    fn resolve_by_index_and_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        fs::create_dir_all(mgr.dir()).unwrap();
        fs::write(mgr.dir().join("data.csv.bak.20240101000000"), "a\n").unwrap();
        fs::write(mgr.dir().join("data.csv.bak.20240102000000"), "b\n").unwrap();

        let second = mgr.resolve("2").unwrap();
        assert!(second.ends_with("data.csv.bak.20240102000000"));

        let by_name = mgr.resolve("data.csv.bak.20240101000000").unwrap();
        assert!(by_name.ends_with("data.csv.bak.20240101000000"));
    }

    #[test]
    fn resolve_rejects_bad_tokens() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        fs::create_dir_all(mgr.dir()).unwrap();
        fs::write(mgr.dir().join("data.csv.bak.20240101000000"), "a\n").unwrap();

        assert!(matches!(
            mgr.resolve("2"),
            Err(CatalogError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            mgr.resolve("0"),
            Err(CatalogError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            mgr.resolve("nonexistent.bak"),
            Err(CatalogError::BackupNotFound(_))
        ));
    }

    #[test]
    fn diff_marks_additions_and_deletions() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.csv");
        let b = tmp.path().join("b.csv");
        fs::write(&a, "tt1,Matrix\ntt2,Heat\n").unwrap();
        fs::write(&b, "tt1,Matrix\ntt3,Alien\n").unwrap();

        let mgr = manager(tmp.path());
        let text = mgr.diff(&a, &b).unwrap();
        assert!(text.contains("@@"));
        assert!(text.contains("-tt2,Heat"));
        assert!(text.contains("+tt3,Alien"));
        assert!(text.contains(" tt1,Matrix"));
    }

    #[test]
    fn restore_copies_backup_over_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        fs::write(mgr.catalog_path(), "current\n").unwrap();
        fs::create_dir_all(mgr.dir()).unwrap();
        let bak = mgr.dir().join("data.csv.bak.20240101000000");
        fs::write(&bak, "older\n").unwrap();

        mgr.restore(&bak).unwrap();
        assert_eq!(fs::read_to_string(mgr.catalog_path()).unwrap(), "older\n");
        // the backup itself is untouched
        assert_eq!(fs::read_to_string(&bak).unwrap(), "older\n");
    }

    #[test]
    fn delete_removes_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mgr = manager(tmp.path());
        fs::create_dir_all(mgr.dir()).unwrap();
        let bak = mgr.dir().join("data.csv.bak.20240101000000");
        fs::write(&bak, "x\n").unwrap();

        mgr.delete(&bak).unwrap();
        assert!(!bak.exists());
        assert!(matches!(
            mgr.delete(&bak),
            Err(CatalogError::BackupNotFound(_))
        ));
    }

    #[test]
    fn human_sizes() {
        assert_eq!(human_size(0), "0 bytes");
        assert_eq!(human_size(512), "512 bytes");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(1_572_864), "1.5 MB");
    }
}
