//! CLI argument parsing for cyclecount

use crate::config::{FailurePolicy, OutputFormat, RunConfig};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cyclecount")]
#[command(version)]
#[command(
    about = "Count oscillation cycles per channel using hysteresis zero-crossings",
    long_about = None
)]
pub struct Cli {
    /// Input files (.csv, .txt, .asc, .tem, .ltx, .ltd)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Hysteresis threshold: a sample must exceed +T or fall below -T to count
    #[arg(short = 't', long = "threshold", value_name = "T")]
    pub threshold: Option<f64>,

    /// Report path (default: cycle_counts.tsv in the working directory)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Stop at the first file that cannot be read instead of skipping it
    #[arg(long = "abort-on-error")]
    pub abort_on_error: bool,

    /// Field separator for text inputs
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Round durations in the TSV report to this many decimals
    #[arg(long = "duration-precision", value_name = "DIGITS")]
    pub duration_precision: Option<usize>,

    /// Load settings from a TOML file (flags override it)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print each file's channel names instead of counting cycles
    #[arg(long = "list-channels")]
    pub list_channels: bool,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Resolve defaults, the optional config file and flag overrides
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(output) = &self.output {
            config.output_filename = output.to_string_lossy().into_owned();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.abort_on_error {
            config.failure_policy = FailurePolicy::Abort;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.duration_precision.is_some() {
            config.duration_precision = self.duration_precision;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_parses_files() {
        let cli = Cli::parse_from(["cyclecount", "a.csv", "b.txt"]);
        assert_eq!(cli.files, vec![PathBuf::from("a.csv"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_cli_empty_without_files() {
        let cli = Cli::parse_from(["cyclecount"]);
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_cli_defaults_resolve_to_default_config() {
        let cli = Cli::parse_from(["cyclecount", "a.csv"]);
        assert_eq!(cli.run_config().unwrap(), RunConfig::default());
    }

    #[test]
    fn test_cli_threshold_flag() {
        let cli = Cli::parse_from(["cyclecount", "-t", "2.5", "a.csv"]);
        assert_eq!(cli.threshold, Some(2.5));
        assert_eq!(cli.run_config().unwrap().threshold, 2.5);
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["cyclecount", "--format", "json", "a.csv"]);
        assert_eq!(cli.run_config().unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_abort_on_error_flag() {
        let cli = Cli::parse_from(["cyclecount", "--abort-on-error", "a.csv"]);
        assert_eq!(
            cli.run_config().unwrap().failure_policy,
            FailurePolicy::Abort
        );
    }

    #[test]
    fn test_cli_output_and_delimiter() {
        let cli = Cli::parse_from(["cyclecount", "-o", "out.tsv", "-d", ";", "a.csv"]);
        let config = cli.run_config().unwrap();
        assert_eq!(config.output_filename, "out.tsv");
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_cli_list_channels_flag() {
        let cli = Cli::parse_from(["cyclecount", "--list-channels", "a.csv"]);
        assert!(cli.list_channels);
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "threshold = 4.0").unwrap();
        writeln!(file, "duration_precision = 2").unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "cyclecount",
            "--config",
            path.as_str(),
            "-t",
            "6",
            "a.csv",
        ]);
        let config = cli.run_config().unwrap();

        assert_eq!(config.threshold, 6.0);
        assert_eq!(config.duration_precision, Some(2));
    }

    #[test]
    fn test_cli_rejects_bad_threshold_value() {
        assert!(Cli::try_parse_from(["cyclecount", "-t", "ten", "a.csv"]).is_err());
    }
}
