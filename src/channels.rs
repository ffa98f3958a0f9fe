//! Channel selection: every column except the time axis

use crate::reader::RawRecord;

/// Name of the time axis column, matched case-insensitively
pub const TIME_COLUMN: &str = "time";

/// A signal channel borrowed from a [`RawRecord`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel<'a> {
    pub name: &'a str,
    pub samples: &'a [f64],
}

/// True when `name` is the time column (`Time`, `time`, `TIME`, ...)
pub fn is_time_column(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(TIME_COLUMN)
}

/// Channels to count, in the order the record stores them
pub fn extract(record: &RawRecord) -> Vec<Channel<'_>> {
    record
        .columns
        .iter()
        .filter(|column| !is_time_column(&column.name))
        .map(|column| Channel {
            name: &column.name,
            samples: &column.samples,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Column;

    fn record(names: &[&str]) -> RawRecord {
        RawRecord::new(
            1.0,
            names
                .iter()
                .enumerate()
                .map(|(i, n)| Column::new(*n, vec![i as f64]))
                .collect(),
        )
    }

    #[test]
    fn test_time_column_variants() {
        assert!(is_time_column("Time"));
        assert!(is_time_column("time"));
        assert!(is_time_column("TIME"));
        assert!(is_time_column(" tImE "));
        assert!(!is_time_column("timestamp"));
        assert!(!is_time_column("time[s]"));
    }

    #[test]
    fn test_extract_excludes_time_and_keeps_order() {
        let rec = record(&["Time", "z", "a", "m"]);
        let channels = extract(&rec);

        let names: Vec<&str> = channels.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert_eq!(channels[0].samples, &[1.0]);
    }

    #[test]
    fn test_extract_time_last() {
        let rec = record(&["x", "y", "TIME"]);
        let names: Vec<&str> = extract(&rec).iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_extract_only_time() {
        assert!(extract(&record(&["time"])).is_empty());
    }
}
