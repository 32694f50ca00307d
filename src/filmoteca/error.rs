use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog file not found: {}", .0.display())]
    CatalogMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid id (expected an integer): {0}")]
    InvalidId(String),

    #[error("invalid rating (expected a number between 0 and 10): {0}")]
    InvalidRating(String),

    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("invalid IMDb const (expected tt followed by digits): {0}")]
    InvalidKey(String),

    #[error("backup not found: {0}")]
    BackupNotFound(String),

    #[error("backup index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
