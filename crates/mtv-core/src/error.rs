//! Error types for the fallible edges of the view engine.
//!
//! The view pipeline itself is total; only loading a category table and
//! delivering an export can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a category table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The table file could not be read.
    #[error("failed to read category table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table file is not valid TOML for a category table.
    #[error("invalid category table: {0}")]
    Parse(#[from] toml::de::Error),

    /// The same tool tag is mapped twice.
    #[error("duplicate category tag: {tag}")]
    DuplicateTag { tag: String },
}

/// Errors raised while serializing or delivering an export artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize export as CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The download sink rejected the artifact.
    #[error("failed to deliver {name}: {source}")]
    Sink {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
