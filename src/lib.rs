//! cyclecount - per-channel cycle counting for time-series logs
//!
//! This library estimates oscillation cycles in each channel of a measurement
//! file with a hysteresis zero-crossing counter, summarizes one row per file,
//! and assembles the rows into a TSV or JSON report.

pub mod channels;
pub mod cli;
pub mod config;
pub mod error;
pub mod hysteresis;
pub mod json_output;
pub mod reader;
pub mod report;
pub mod run;
pub mod summary;
pub mod tsv_output;

pub use error::CycleCountError;
pub use hysteresis::{count_cycles, HysteresisCounter, Zone};
