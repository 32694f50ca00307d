use crate::error::Result;
use crate::model::Schema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "catalog.json";
const DEFAULT_BACKUP_DIR: &str = "backups";

/// Settings for one catalog, stored as `catalog.json` next to the CSV file.
///
/// Loaded once at startup and passed down explicitly; nothing reads it after
/// that. CLI flags override individual values per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Column layout and identity scheme of the catalog file.
    #[serde(default)]
    pub schema: Schema,

    /// Directory for snapshots, relative to the catalog file.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

fn default_backup_dir() -> String {
    DEFAULT_BACKUP_DIR.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            backup_dir: default_backup_dir(),
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CatalogConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
