//! Report assembly across files
//!
//! The channel columns come from the **last** row only. Earlier rows are
//! projected onto that column set: channels they lack become absent cells,
//! channels the last file lacks are dropped. This mirrors the legacy tool's
//! output and is intentionally not a union of channel sets.

use crate::summary::SummaryRow;

/// Header of the file-name column
pub const FILE_COLUMN: &str = "File";

/// Header of the duration column
pub const DURATION_COLUMN: &str = "Duration (s)";

/// A row projected onto the report's channel columns
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord<'a> {
    pub file: &'a str,
    pub duration_s: f64,
    /// One cell per channel column; `None` when the file lacks that channel
    pub cycles: Vec<Option<u64>>,
}

/// Rows in processing order plus the fixed channel column set
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    channels: Vec<String>,
    rows: Vec<SummaryRow>,
}

impl Report {
    /// Channel column names, in order
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Full header: `File`, `Duration (s)`, then the channel columns
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = vec![FILE_COLUMN, DURATION_COLUMN];
        columns.extend(self.channels.iter().map(String::as_str));
        columns
    }

    /// Every row aligned to [`channels`](Self::channels)
    ///
    /// A channel name that repeats in the header is matched to the same
    /// repeat in each row, so the second `a` column reads the second `a`.
    pub fn records(&self) -> impl Iterator<Item = ReportRecord<'_>> {
        self.rows.iter().map(move |row| ReportRecord {
            file: &row.file,
            duration_s: row.duration_s,
            cycles: self
                .channels
                .iter()
                .enumerate()
                .map(|(idx, ch)| {
                    let occurrence = self.channels[..idx].iter().filter(|c| *c == ch).count();
                    row.get_nth(ch, occurrence)
                })
                .collect(),
        })
    }
}

/// Build a [`Report`] whose channel columns are those of the last row
pub fn assemble(rows: Vec<SummaryRow>) -> Report {
    let channels: Vec<String> = rows
        .last()
        .map(|last| last.channel_names().map(str::to_string).collect())
        .unwrap_or_default();

    for row in &rows {
        let dropped: Vec<&str> = row
            .channel_names()
            .filter(|name| !channels.iter().any(|c| c.as_str() == *name))
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(
                "{}: channels not in the last file's header are dropped: {}",
                row.file,
                dropped.join(", ")
            );
        }
    }

    Report { channels, rows }
}
