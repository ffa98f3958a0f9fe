use anyhow::{Context, Result};
use clap::Parser;
use cyclecount::{
    cli::Cli,
    reader::ReadError,
    run::{self, RunOutcome},
    CycleCountError,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the channel names of each file (--list-channels)
fn print_channel_listing(listing: Vec<(String, Result<Vec<String>, ReadError>)>) {
    for (file, headers) in listing {
        match headers {
            Ok(names) => {
                println!("{}:", file);
                for name in names {
                    println!("  {}", name);
                }
            }
            Err(err) => eprintln!("Failed to read {}: {}", file, err),
        }
    }
}

fn report_failures(outcome: &RunOutcome) {
    for failure in &outcome.failures {
        eprintln!("{}", failure);
    }
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = args.run_config()?;

    if args.list_channels {
        return match run::list_channels(&args.files, &config) {
            Ok(listing) => {
                print_channel_listing(listing);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{}", err);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let outcome = match run::run(&args.files, &config) {
        Ok(outcome) => outcome,
        Err(CycleCountError::NoInput) => {
            eprintln!("{}", CycleCountError::NoInput);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("Cycle count run failed"),
    };

    report_failures(&outcome);

    let written = run::write_report(&outcome.report, &config)?;
    let shown = std::fs::canonicalize(&written).unwrap_or(written);
    println!("\nResults exported to: {}", shown.display());

    Ok(ExitCode::SUCCESS)
}
