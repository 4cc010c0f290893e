use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("index {index} is out of range for {len} cats")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("background load failed: {0}")]
    Task(String),
    #[error("the catalog has not been loaded")]
    NotLoaded,
    #[error("there is no cat at position {0}")]
    MissingRecord(usize),
    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

