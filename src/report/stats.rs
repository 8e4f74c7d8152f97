//! Statistics generation for completed scans
//!
//! This module derives the run summary from a frozen scan result and
//! renders the block printed after each run.

use crate::model::ScanResult;

/// Scan statistics summary
#[derive(Debug, Clone)]
pub struct ScanStatistics {
    /// Number of IDs attempted
    pub total_attempted: u64,

    /// Number of profiles found
    pub found: u64,

    /// Number of errors recorded
    pub errors: u64,

    /// Elapsed scan time in seconds
    pub duration_seconds: f64,
}

impl ScanStatistics {
    /// Derives statistics from a completed scan
    pub fn from_result(result: &ScanResult) -> Self {
        ScanStatistics {
            total_attempted: result.total_attempted,
            found: result.found_count() as u64,
            errors: result.error_count() as u64,
            duration_seconds: result.duration.as_secs_f64(),
        }
    }

    /// Share of attempted IDs that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_attempted == 0 {
            return 0.0;
        }
        self.found as f64 / self.total_attempted as f64 * 100.0
    }

    /// Attempted IDs per second over the whole run
    pub fn throughput(&self) -> f64 {
        if self.duration_seconds <= 0.0 {
            return 0.0;
        }
        self.total_attempted as f64 / self.duration_seconds
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ScanStatistics) {
    println!("=== Scan Statistics ===\n");

    println!("  Total IDs attempted: {}", stats.total_attempted);
    println!("  Total profiles found: {}", stats.found);
    println!("  Success rate: {:.1}%", stats.success_rate());
    println!("  Duration: {:.2} seconds", stats.duration_seconds);
    println!("  Average speed: {:.1} profiles/second", stats.throughput());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProfileRecord, ScanError};
    use chrono::Utc;
    use std::time::Duration;

    fn result_with(found: usize, errors: usize) -> ScanResult {
        let now = Utc::now();
        ScanResult {
            start_id: 1,
            end_id: 10,
            profiles: (0..found)
                .map(|i| ProfileRecord {
                    name: Some(format!("User {}", i)),
                    ..ProfileRecord::new(i as u32 + 1)
                })
                .collect(),
            errors: (0..errors)
                .map(|i| ScanError::Forbidden { id: i as u32 + 100 })
                .collect(),
            started_at: now,
            finished_at: now,
            duration: Duration::from_secs(5),
            total_attempted: 10,
        }
    }

    #[test]
    fn test_from_result() {
        let stats = ScanStatistics::from_result(&result_with(4, 2));

        assert_eq!(stats.total_attempted, 10);
        assert_eq!(stats.found, 4);
        assert_eq!(stats.errors, 2);
        assert!((stats.duration_seconds - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate() {
        let stats = ScanStatistics::from_result(&result_with(4, 0));
        assert!((stats.success_rate() - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_zero_attempted() {
        let stats = ScanStatistics {
            total_attempted: 0,
            found: 0,
            errors: 0,
            duration_seconds: 0.0,
        };
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_throughput() {
        let stats = ScanStatistics::from_result(&result_with(4, 0));
        assert!((stats.throughput() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_throughput_zero_duration() {
        let stats = ScanStatistics {
            total_attempted: 10,
            found: 1,
            errors: 0,
            duration_seconds: 0.0,
        };
        assert_eq!(stats.throughput(), 0.0);
    }
}
