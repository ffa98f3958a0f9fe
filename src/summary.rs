//! Per-file summary: one row of cycle counts per input file

use crate::channels;
use crate::hysteresis::count_cycles;
use crate::reader::{self, RawRecord, ReadError, ReaderOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to summarize a single file
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: ReadError,
    },
}

impl SummarizeError {
    pub fn path(&self) -> &Path {
        match self {
            SummarizeError::FileRead { path, .. } => path,
        }
    }
}

/// Cycle counts for every channel of one file
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub file: String,
    pub duration_s: f64,
    /// `(channel, cycles)` in channel order
    pub counts: Vec<(String, u64)>,
}

impl SummaryRow {
    pub fn new(file: impl Into<String>, duration_s: f64) -> Self {
        Self {
            file: file.into(),
            duration_s,
            counts: Vec::new(),
        }
    }

    pub fn push(&mut self, channel: impl Into<String>, cycles: u64) {
        self.counts.push((channel.into(), cycles));
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, channel: impl Into<String>, cycles: u64) -> Self {
        self.push(channel, cycles);
        self
    }

    /// Cycle count recorded for `channel`, if this file has it
    pub fn get(&self, channel: &str) -> Option<u64> {
        self.get_nth(channel, 0)
    }

    /// Cycle count of the `occurrence`-th (0-based) channel named `channel`
    pub fn get_nth(&self, channel: &str, occurrence: usize) -> Option<u64> {
        self.counts
            .iter()
            .filter(|(name, _)| name == channel)
            .nth(occurrence)
            .map(|(_, cycles)| *cycles)
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_channels(&self) -> bool {
        !self.counts.is_empty()
    }
}

/// Display name for a file: its final path component, or the whole path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Builds [`SummaryRow`]s with a fixed threshold
#[derive(Debug, Clone)]
pub struct FileSummarizer {
    threshold: f64,
    reader_options: ReaderOptions,
}

impl FileSummarizer {
    pub fn new(threshold: f64, reader_options: ReaderOptions) -> Self {
        Self {
            threshold,
            reader_options,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Read `path` and count cycles on each of its channels
    pub fn summarize(&self, path: &Path) -> Result<SummaryRow, SummarizeError> {
        let record = reader::read_file(path, &self.reader_options).map_err(|source| {
            SummarizeError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(self.summarize_record(&display_name(path), &record))
    }

    /// Count cycles on an already loaded record
    pub fn summarize_record(&self, file: &str, record: &RawRecord) -> SummaryRow {
        let mut row = SummaryRow::new(file, record.duration_s);

        for channel in channels::extract(record) {
            let cycles = count_cycles(channel.samples, self.threshold);
            tracing::trace!(
                "{}: channel {} -> {} cycles over {} samples",
                file,
                channel.name,
                cycles,
                channel.samples.len()
            );
            row.push(channel.name, cycles);
        }

        if !row.has_channels() {
            tracing::warn!("{}: no channels besides the time column", file);
        }

        row
    }
}
