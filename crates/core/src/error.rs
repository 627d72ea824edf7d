use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnneError {
    #[error("config not found: {path:?}")]
    ConfigNotFound { path: PathBuf },
    #[error("invalid config {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    ConfigInvalid(String),
    #[error("record store not found: {path:?}")]
    StoreNotFound { path: PathBuf },
    #[error("failed to read record store {path:?}: {source}")]
    StoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid record at {path:?} line {line}: {message}")]
    StoreParse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("failed to write record store {path:?}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid row index {raw:?} for a store of {len} records")]
    InvalidIndex { raw: String, len: usize },
}

pub type Result<T> = std::result::Result<T, AnneError>;

impl AnneError {
    /// Stable machine-readable name, used by the HTTP layer.
    pub fn kind(&self) -> &'static str {
        match self {
            AnneError::ConfigNotFound { .. } => "config_not_found",
            AnneError::ConfigParse { .. } => "config_parse_error",
            AnneError::ConfigInvalid(_) => "config_invalid",
            AnneError::StoreNotFound { .. } => "store_not_found",
            AnneError::StoreRead { .. } => "store_read_error",
            AnneError::StoreParse { .. } => "store_parse_error",
            AnneError::StoreWrite { .. } => "store_write_error",
            AnneError::InvalidIndex { .. } => "invalid_index",
        }
    }

    pub(crate) fn store_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreWrite {
            path: path.into(),
            source,
        }
    }
}
