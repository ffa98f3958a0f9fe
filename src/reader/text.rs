//! Delimited text reader (.csv, .txt, .asc)
//!
//! Layout: one header line naming the columns, then one line of numbers per
//! sample. A `time` column (any case) is required and supplies the duration.
//! Empty fields load as NaN, which the counter treats as dead band. Quoting
//! follows normal CSV rules, and duplicate column names get `.1`, `.2`
//! suffixes.

use super::{unique_names, Column, FileReader, RawRecord, ReadError};
use crate::channels::is_time_column;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reader for comma (or otherwise) delimited text logs
#[derive(Debug, Clone)]
pub struct DelimitedTextReader {
    delimiter: char,
}

impl DelimitedTextReader {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn open(&self, path: &Path) -> Result<File, ReadError> {
        File::open(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for DelimitedTextReader {
    fn default() -> Self {
        Self::new(',')
    }
}

impl FileReader for DelimitedTextReader {
    fn format_name(&self) -> &'static str {
        "delimited text"
    }

    fn read(&self, path: &Path) -> Result<RawRecord, ReadError> {
        parse_reader(self.open(path)?, self.delimiter)
    }

    fn read_headers(&self, path: &Path) -> Result<Vec<String>, ReadError> {
        let reader = csv_reader(self.open(path)?, self.delimiter)?;
        let header = non_blank_rows(reader).next().ok_or(ReadError::EmptyFile)??;

        Ok(header_names(&header)
            .into_iter()
            .filter(|name| !is_time_column(name))
            .collect())
    }
}

/// Build a CSV reader with trimming and per-row length checks left to us
fn csv_reader<R: Read>(source: R, delimiter: char) -> Result<csv::Reader<R>, ReadError> {
    if !delimiter.is_ascii() || matches!(delimiter, '\n' | '\r' | '"') {
        return Err(ReadError::InvalidDelimiter(delimiter));
    }

    Ok(ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source))
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(str::is_empty)
}

fn non_blank_rows<R: Read>(
    reader: csv::Reader<R>,
) -> impl Iterator<Item = csv::Result<StringRecord>> {
    reader
        .into_records()
        .filter(|row| !matches!(row, Ok(record) if is_blank(record)))
}

fn header_names(header: &StringRecord) -> Vec<String> {
    let names = header.iter().enumerate().map(|(idx, name)| {
        if idx == 0 {
            name.trim_start_matches('\u{feff}').trim().to_string()
        } else {
            name.to_string()
        }
    });
    unique_names(names)
}

fn line_of(row: &StringRecord) -> usize {
    row.position().map_or(0, |pos| pos.line() as usize)
}

fn parse_field(field: &str) -> Option<f64> {
    if field.is_empty() {
        return Some(f64::NAN);
    }
    field.parse::<f64>().ok()
}

/// Parse delimited text from any byte source into a [`RawRecord`]
///
/// Duration is `last time - first time`; a header with no data rows gives a
/// duration of 0 and empty columns. Every time value must be finite.
pub fn parse_reader<R: Read>(source: R, delimiter: char) -> Result<RawRecord, ReadError> {
    let mut rows = non_blank_rows(csv_reader(source, delimiter)?);

    let header = rows.next().ok_or(ReadError::EmptyFile)??;
    let names = header_names(&header);
    let time_idx = names
        .iter()
        .position(|name| is_time_column(name))
        .ok_or(ReadError::MissingTimeColumn)?;

    let mut data: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for row in rows {
        let row = row?;
        let line = line_of(&row);
        if row.len() != names.len() {
            return Err(ReadError::FieldCount {
                line,
                expected: names.len(),
                found: row.len(),
            });
        }

        for (idx, field) in row.iter().enumerate() {
            let value = parse_field(field).ok_or_else(|| ReadError::InvalidNumber {
                line,
                column: names[idx].clone(),
                value: field.to_string(),
            })?;
            if idx == time_idx && !value.is_finite() {
                return Err(ReadError::InvalidTime {
                    line,
                    value: field.to_string(),
                });
            }
            data[idx].push(value);
        }
    }

    let time = &data[time_idx];
    let duration_s = match (time.first(), time.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };

    let columns = names
        .into_iter()
        .zip(data)
        .map(|(name, samples)| Column::new(name, samples))
        .collect();

    Ok(RawRecord::new(duration_s, columns))
}

/// Parse the full text of a delimited log
pub fn parse_delimited(contents: &str, delimiter: char) -> Result<RawRecord, ReadError> {
    parse_reader(contents.as_bytes(), delimiter)
}
