//! Library error type for a cycle-count run

use crate::config::ConfigError;
use crate::summary::SummarizeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CycleCountError {
    #[error("No file selected.")]
    NoInput,

    #[error(transparent)]
    FileRead(#[from] SummarizeError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to format TSV report: {0}")]
    Tsv(#[from] csv::Error),
}
