//! Time-series file readers
//!
//! Each supported format implements [`FileReader`]. The concrete reader is
//! chosen from the file extension by [`reader_for_path`], so the summarizer
//! never branches on format itself.

pub mod lynx;
pub mod text;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use lynx::LynxReader;
pub use text::DelimitedTextReader;

/// Extensions handled by [`DelimitedTextReader`]
pub const TEXT_EXTENSIONS: &[&str] = &["csv", "txt", "asc"];

/// Extensions handled by [`LynxReader`]
pub const LYNX_EXTENSIONS: &[&str] = &["tem", "ltx", "ltd"];

/// Errors raised while opening or parsing an input file
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type: {extension:?}")]
    UnsupportedExtension { extension: String },

    #[error("{format} files cannot be read on this platform: {reason}")]
    Unsupported { format: &'static str, reason: String },

    #[error("File is empty (no header line)")]
    EmptyFile,

    #[error("'time' column not found")]
    MissingTimeColumn,

    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: column '{column}' has non-numeric value {value:?}")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Line {line}: time value {value:?} is not a finite number")]
    InvalidTime { line: usize, value: String },

    #[error("Invalid delimiter {0:?}: must be an ASCII character other than a newline or quote")]
    InvalidDelimiter(char),

    #[error("Malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
}

/// One named column of samples as stored in the file
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub samples: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }
}

/// Everything a reader extracts from one file
///
/// Columns keep file order and include the time column, if the format has
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Signal duration in seconds, as reported by the format
    pub duration_s: f64,
    pub columns: Vec<Column>,
}

impl RawRecord {
    pub fn new(duration_s: f64, columns: Vec<Column>) -> Self {
        Self {
            duration_s,
            columns,
        }
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Make column names unique the way pandas does: the second `a` becomes
/// `a.1`, the third `a.2`, skipping any suffix already taken
pub fn unique_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut taken = HashSet::new();
    let mut unique = Vec::new();

    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 0;
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", name, suffix);
        }
        taken.insert(candidate.clone());
        unique.push(candidate);
    }

    unique
}

/// Options shared by every reader in a run
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    /// Field separator for delimited text files
    pub delimiter: char,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Capability interface for a time-series file format
pub trait FileReader {
    /// Short format name used in log messages
    fn format_name(&self) -> &'static str;

    /// Read duration and every column of the file
    fn read(&self, path: &Path) -> Result<RawRecord, ReadError>;

    /// Read only the channel names (time column excluded)
    ///
    /// The default implementation reads the whole file; formats with a cheap
    /// header override it.
    fn read_headers(&self, path: &Path) -> Result<Vec<String>, ReadError> {
        let record = self.read(path)?;
        Ok(crate::channels::extract(&record)
            .into_iter()
            .map(|c| c.name.to_string())
            .collect())
    }
}

/// Lowercase extension of `path`, or an empty string
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Pick the reader for `path` based on its extension (case-insensitive)
pub fn reader_for_path(
    path: &Path,
    options: &ReaderOptions,
) -> Result<Box<dyn FileReader>, ReadError> {
    let extension = extension_of(path);

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        Ok(Box::new(DelimitedTextReader::new(options.delimiter)))
    } else if LYNX_EXTENSIONS.contains(&extension.as_str()) {
        Ok(Box::new(LynxReader))
    } else {
        Err(ReadError::UnsupportedExtension {
            extension: if extension.is_empty() {
                String::new()
            } else {
                format!(".{}", extension)
            },
        })
    }
}

/// Read `path` with the reader its extension selects
pub fn read_file(path: &Path, options: &ReaderOptions) -> Result<RawRecord, ReadError> {
    let reader = reader_for_path(path, options)?;
    tracing::debug!("Reading {} as {}", path.display(), reader.format_name());
    reader.read(path)
}

/// Read only the channel names of `path`
pub fn read_headers(path: &Path, options: &ReaderOptions) -> Result<Vec<String>, ReadError> {
    reader_for_path(path, options)?.read_headers(path)
}
