//! Run driver: summarize every input file, assemble and write the report
//!
//! Files are processed sequentially so row order always equals input order.

use crate::config::{FailurePolicy, OutputFormat, RunConfig};
use crate::error::CycleCountError;
use crate::json_output::JsonOutput;
use crate::reader;
use crate::report::{assemble, Report};
use crate::summary::{display_name, FileSummarizer, SummarizeError};
use crate::tsv_output::TsvOutput;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of processing a batch of files
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    /// Files that could not be read (only populated under `Skip`)
    pub failures: Vec<SummarizeError>,
}

impl RunOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Summarize `paths` in order and assemble the report
///
/// # Errors
///
/// [`CycleCountError::NoInput`] when `paths` is empty, a configuration error
/// when `config` does not validate, and under [`FailurePolicy::Abort`] the
/// first file that fails to read.
pub fn run<P: AsRef<Path>>(
    paths: &[P],
    config: &RunConfig,
) -> Result<RunOutcome, CycleCountError> {
    if paths.is_empty() {
        return Err(CycleCountError::NoInput);
    }
    config.validate()?;

    let summarizer = FileSummarizer::new(config.threshold, config.reader_options());
    let mut rows = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match summarizer.summarize(path) {
            Ok(row) => {
                tracing::debug!(
                    "{}: {} channel(s), duration {}s",
                    row.file,
                    row.counts.len(),
                    row.duration_s
                );
                rows.push(row);
            }
            Err(err) => match config.failure_policy {
                FailurePolicy::Abort => return Err(err.into()),
                FailurePolicy::Skip => {
                    tracing::warn!("{}", err);
                    failures.push(err);
                }
            },
        }
    }

    tracing::info!(
        "Summarized {} of {} file(s) at threshold {}",
        rows.len(),
        paths.len(),
        config.threshold
    );

    Ok(RunOutcome {
        report: assemble(rows),
        failures,
    })
}

/// Channel names per file, without counting
///
/// Unreadable files are reported inline so one bad path does not hide the
/// others.
pub fn list_channels<P: AsRef<Path>>(
    paths: &[P],
    config: &RunConfig,
) -> Result<Vec<(String, Result<Vec<String>, reader::ReadError>)>, CycleCountError> {
    if paths.is_empty() {
        return Err(CycleCountError::NoInput);
    }
    let options = config.reader_options();

    Ok(paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            (display_name(path), reader::read_headers(path, &options))
        })
        .collect())
}

/// Render `report` in the configured format
pub fn render_report(report: &Report, config: &RunConfig) -> Result<String, CycleCountError> {
    match config.format {
        OutputFormat::Tsv => Ok(TsvOutput::new(config.duration_precision).to_tsv(report)?),
        OutputFormat::Json => Ok(JsonOutput::from_report(report, config.threshold).to_json()?),
    }
}

/// Write `report` to `config.output_filename` and return the path written
pub fn write_report(report: &Report, config: &RunConfig) -> Result<PathBuf, CycleCountError> {
    let path = PathBuf::from(&config.output_filename);
    let contents = render_report(report, config)?;

    fs::write(&path, contents).map_err(|source| CycleCountError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Wrote {} row(s) to {}", report.rows().len(), path.display());
    Ok(path)
}
