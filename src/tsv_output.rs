//! TSV output format for cycle-count reports
//!
//! One header line, then one line per file. Absent cells are empty fields.
//! Fields holding a tab, quote or newline are quoted CSV-style.

use crate::report::Report;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// TSV output formatter
#[derive(Debug, Clone, Default)]
pub struct TsvOutput {
    /// Round durations to this many decimals (unmodified when `None`)
    duration_precision: Option<usize>,
}

impl TsvOutput {
    /// Create a new TSV output formatter
    pub fn new(duration_precision: Option<usize>) -> Self {
        Self { duration_precision }
    }

    fn format_duration(&self, duration_s: f64) -> String {
        match self.duration_precision {
            Some(precision) => {
                let factor = 10f64.powi(precision as i32);
                format!("{}", (duration_s * factor).round() / factor)
            }
            None => format!("{}", duration_s),
        }
    }

    /// Generate TSV output as string
    pub fn to_tsv(&self, report: &Report) -> csv::Result<String> {
        let mut wtr = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(vec![]);

        wtr.write_record(report.columns())?;

        for record in report.records() {
            let mut fields = vec![
                record.file.to_string(),
                self.format_duration(record.duration_s),
            ];
            fields.extend(
                record
                    .cycles
                    .iter()
                    .map(|cell| cell.map(|c| c.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&fields)?;
        }

        let bytes = wtr.into_inner().map_err(|err| err.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
