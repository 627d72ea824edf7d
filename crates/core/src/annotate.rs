use std::path::{Path, PathBuf};

use parking_lot::{const_mutex, Mutex};
use serde::Serialize;
use tracing::info;

use crate::config::{config_path, Config};
use crate::error::{AnneError, Result};
use crate::record::Record;
use crate::store::RecordStore;

// Serializes read-modify-write cycles within this process.
static WRITE_LOCK: Mutex<()> = const_mutex(());

/// Everything the annotation page needs on load.
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub config: Config,
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub annotated: usize,
}

/// Acknowledgment of a stored annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub index: usize,
    pub column: String,
    pub total: usize,
}

/// Entry point for page loads and label submissions. Configuration and
/// records are re-read on every call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Annotator {
    config_path: PathBuf,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(config_path())
    }
}

impl Annotator {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> Result<Config> {
        Config::load_from(&self.config_path)
    }

    pub fn load_page(&self) -> Result<PageData> {
        let config = self.config()?;
        let rows = RecordStore::new(config.data_path()).read()?;
        Ok(PageData { config, rows })
    }

    pub fn progress(&self) -> Result<Progress> {
        let page = self.load_page()?;
        let column = &page.config.annotation_column;
        let annotated = page
            .rows
            .iter()
            .filter(|row| {
                row.text(column)
                    .map(|value| !value.trim().is_empty())
                    .unwrap_or(false)
            })
            .count();
        Ok(Progress {
            total: page.rows.len(),
            annotated,
        })
    }

    /// Form-facing update: `index` is the raw decimal string from the request.
    pub fn submit(&self, index: &str, label: &str) -> Result<Submission> {
        let _guard = WRITE_LOCK.lock();
        let config = self.config()?;
        let store = RecordStore::new(config.data_path());
        let mut rows = store.read()?;
        let position = resolve_index(index, rows.len())?;
        rows[position].set_text(&config.annotation_column, label);
        store.write(&rows)?;
        info!(
            index = position,
            column = %config.annotation_column,
            path = %store.path().display(),
            "stored annotation"
        );
        Ok(Submission {
            index: position,
            column: config.annotation_column,
            total: rows.len(),
        })
    }

    pub fn submit_at(&self, index: usize, label: &str) -> Result<Submission> {
        self.submit(&index.to_string(), label)
    }
}

/// Loads configuration from the well-known location and submits one label.
pub fn submit_annotation(index: &str, label: &str) -> Result<Submission> {
    Annotator::default().submit(index, label)
}

/// Parses a base-10 row index and checks it against the current store length.
pub fn resolve_index(raw: &str, len: usize) -> Result<usize> {
    let invalid = || AnneError::InvalidIndex {
        raw: raw.to_string(),
        len,
    };
    let trimmed = raw.trim();
    if trimmed.starts_with('+') {
        return Err(invalid());
    }
    let index: usize = trimmed.parse().map_err(|_| invalid())?;
    if index >= len {
        return Err(invalid());
    }
    Ok(index)
}
