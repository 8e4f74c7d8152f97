//! Result file generation
//!
//! Each run writes a fresh timestamped directory under the configured
//! results root containing:
//! - `detailed_profiles.txt` - human-readable dump of every record
//! - `profiles.json` - the same records as a pretty-printed JSON array
//! - `emails.txt` - one harvested address per line
//! - `errors.log` - one line per recorded error, only when there were any
//!
//! The emails and JSON files depend only on the scan result, so writing
//! the same result twice produces byte-identical content.

use crate::model::ScanResult;
use crate::report::{ReportError, ReportResult};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes all report files for a completed scan
///
/// # Arguments
///
/// * `result` - The frozen scan result
/// * `destination_root` - Directory under which the run directory is created
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the created run directory
/// * `Err(ReportError)` - Directory creation or a file write failed
pub fn write_reports(result: &ScanResult, destination_root: &Path) -> ReportResult<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let run_dir = destination_root.join(timestamp);
    fs::create_dir_all(&run_dir)?;

    fs::write(
        run_dir.join("detailed_profiles.txt"),
        format_detailed_profiles(result),
    )?;
    fs::write(run_dir.join("profiles.json"), format_profiles_json(result)?)?;
    fs::write(run_dir.join("emails.txt"), format_emails(result))?;

    if !result.errors.is_empty() {
        fs::write(run_dir.join("errors.log"), format_errors(result))?;
    }

    debug!(dir = %run_dir.display(), "Reports written");
    Ok(run_dir)
}

/// Formats the human-readable profile dump
///
/// A header block describes the run; each record follows as `Label: value`
/// lines for its populated fields, separated by a divider.
fn format_detailed_profiles(result: &ScanResult) -> String {
    let mut out = String::new();

    out.push_str("MOODLE PROFILE SCAN RESULTS\n");
    out.push_str(&format!(
        "Scan Range: {} - {}\n",
        result.start_id, result.end_id
    ));
    out.push_str(&format!("Total Profiles: {}\n", result.found_count()));
    out.push_str(&format!(
        "Scan Date: {}\n",
        result
            .finished_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Duration: {:.2} seconds\n",
        result.duration.as_secs_f64()
    ));
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    for profile in &result.profiles {
        for (label, value) in profile.present_fields() {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        out.push_str(&"─".repeat(50));
        out.push_str("\n\n");
    }

    out
}

/// Formats the JSON export of all records
fn format_profiles_json(result: &ScanResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&result.profiles)?)
}

/// Formats the email list, one address per line
fn format_emails(result: &ScanResult) -> String {
    let mut out = String::new();
    for profile in &result.profiles {
        if let Some(email) = profile.email.as_deref() {
            if !email.is_empty() {
                out.push_str(email);
                out.push('\n');
            }
        }
    }
    out
}

/// Formats the error log, one display line per error
fn format_errors(result: &ScanResult) -> String {
    result
        .errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
