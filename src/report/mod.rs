//! Report module for persisting scan results
//!
//! This module turns a frozen [`crate::model::ScanResult`] into the run's
//! output files and the summary statistics printed at the end:
//! - a human-readable profile dump
//! - a JSON export of the same records
//! - a plain list of harvested email addresses
//! - an error log, written only when something went wrong

mod stats;
mod writer;

pub use stats::{print_statistics, ScanStatistics};
pub use writer::write_reports;

use thiserror::Error;

/// Errors that can occur while writing reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize profiles: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
