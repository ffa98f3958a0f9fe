//! Run configuration
//!
//! Values are resolved in three layers: built-in defaults, an optional TOML
//! file, then command-line overrides. The resolved [`RunConfig`] is passed
//! explicitly to the summarizer and writers.
//!
//! # Example cyclecount.toml
//!
//! ```toml
//! threshold = 5.0
//! output_filename = "fatigue_cycles.tsv"
//! failure_policy = "abort"
//! delimiter = ";"
//! duration_precision = 4
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::reader::ReaderOptions;

/// Default hysteresis threshold
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// Default report file name, written to the working directory
pub const DEFAULT_OUTPUT_FILENAME: &str = "cycle_counts.tsv";

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated values (default)
    #[default]
    Tsv,
    /// JSON document for machine parsing
    Json,
}

/// What to do when a file cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and continue with the remaining files (default)
    #[default]
    Skip,
    /// Stop the run at the first unreadable file
    Abort,
}

/// Invalid configuration values
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid threshold: {0} (must be a finite value >= 0)")]
    InvalidThreshold(f64),

    #[error("Output filename must not be empty")]
    EmptyOutputFilename,

    #[error("Invalid delimiter {0:?}: must be an ASCII character other than a newline or quote")]
    InvalidDelimiter(char),
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Absolute hysteresis threshold shared by every channel and file
    pub threshold: f64,

    /// Report path; relative paths resolve against the working directory
    pub output_filename: String,

    pub format: OutputFormat,

    pub failure_policy: FailurePolicy,

    /// Field separator for delimited text inputs
    pub delimiter: char,

    /// Round durations in the TSV report (unrounded when absent)
    pub duration_precision: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            format: OutputFormat::default(),
            failure_policy: FailurePolicy::default(),
            delimiter: ',',
            duration_precision: None,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load a configuration from a TOML string; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Check invariants; a zero threshold is accepted but logged
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.threshold == 0.0 {
            tracing::warn!("Threshold is 0: counting plain sign changes with no dead band");
        }
        if self.output_filename.trim().is_empty() {
            return Err(ConfigError::EmptyOutputFilename);
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '\n' | '\r' | '"') {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        Ok(())
    }

    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            delimiter: self.delimiter,
        }
    }
}
