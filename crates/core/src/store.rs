use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{AnneError, Result};
use crate::jsonl::{encode_records, parse_records};
use crate::record::Record;

/// Handle on a line-oriented JSON record file. Holds no records itself:
/// every `read` goes back to disk and every `write` replaces the whole file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<Record>> {
        read_store(&self.path)
    }

    pub fn write(&self, records: &[Record]) -> Result<()> {
        write_store(&self.path, records)
    }
}

pub fn read_store(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(AnneError::StoreNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(AnneError::StoreRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let records = parse_records(&contents).map_err(|err| AnneError::StoreParse {
        path: path.to_path_buf(),
        line: err.line,
        message: err.message,
    })?;
    debug!(path = %path.display(), records = records.len(), "read record store");
    Ok(records)
}

/// Replaces the file with `records`. The content goes to a sibling temp file
/// first and is renamed into place, so a failed write leaves the old store.
/// Symlinks are written through and an existing file keeps its permissions.
pub fn write_store(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_records(records).map_err(|err| AnneError::store_write(path, err))?;
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|err| AnneError::store_write(path, err))?;
    if let Ok(metadata) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|err| AnneError::store_write(path, err))?;
    }
    tmp.write_all(&bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|err| AnneError::store_write(path, err))?;
    tmp.persist(&target)
        .map_err(|err| AnneError::store_write(path, err.error))?;
    debug!(path = %target.display(), records = records.len(), "wrote record store");
    Ok(())
}
