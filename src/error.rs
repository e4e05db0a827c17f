//! Error type for `sunshine-olap`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The loader never overwrites an existing database file.
    #[error("Database {0:?} already exists")]
    DatabaseExists(PathBuf),

    #[error("Database {0:?} not found")]
    DatabaseNotFound(PathBuf),

    #[error("CSV file {0:?} not found")]
    CsvNotFound(PathBuf),

    #[error("Expected {expected} column(s) ({columns}) but header has {found}")]
    HeaderMismatch {
        expected: usize,
        found: usize,
        columns: String,
    },

    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Failed to decode text with encoding {0}")]
    Decode(&'static str),

    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
