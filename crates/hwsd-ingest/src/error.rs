use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("database is missing table {0}")]
    MissingTable(String),
    #[error("read id list {path}: {source}")]
    IdList {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}:{line}: invalid soil mapping unit id {value:?}")]
    InvalidSmuId {
        path: PathBuf,
        line: u64,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
