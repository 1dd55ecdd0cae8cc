//! Output error and result types

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Site information printed at the top of the index files
#[derive(Debug, Clone)]
pub struct IndexHeader {
    /// Base URL as configured
    pub base_url: String,

    /// Display name, e.g. `Sidetool.co`
    pub site_label: String,

    pub generated_at: DateTime<Utc>,
}

impl IndexHeader {
    pub fn new(base_url: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            base_url: crate::url::site_root(base_url).to_string(),
            site_label: crate::url::site_label(base_url),
            generated_at,
        }
    }
}

/// Files produced by one run
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub index_path: PathBuf,
    pub index_bytes: usize,

    /// Absent when full-text output is disabled
    pub full_path: Option<PathBuf>,
    pub full_bytes: usize,

    /// Pages listed in the index
    pub pages_written: usize,
}
