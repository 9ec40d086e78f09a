#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    #[error("{source_name} row {row}: missing {column}")]
    MissingField {
        source_name: String,
        row: u64,
        column: &'static str,
    },

    #[error("{source_name} row {row}: invalid limit {value:?} for {key}")]
    InvalidLimit {
        source_name: String,
        row: u64,
        key: String,
        value: String,
    },

    #[error("{source_name} row {row}: duplicate nuclide key {key}")]
    DuplicateKey {
        source_name: String,
        row: u64,
        key: String,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
