mod annotate;
mod config;
mod error;
mod jsonl;
mod record;
mod store;

pub use annotate::{
    resolve_index, submit_annotation, Annotator, PageData, Progress, Submission,
};
pub use config::{config_path, load_config, ColumnPair, Config, CONFIG_ENV, DEFAULT_CONFIG_FILE};
pub use error::{AnneError, Result};
pub use jsonl::{encode_records, parse_records, JsonlWriter, LineError};
pub use record::Record;
pub use store::{read_store, write_store, RecordStore};
