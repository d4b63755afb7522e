//! Common error types for PodBrief

use thiserror::Error;

/// Common result type for PodBrief operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the configuration, schema and persistence layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while preparing the database or reading config
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error in {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration value missing or out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stored column could not be decoded (e.g. questions JSON, timestamps)
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}
