use crate::model::ProfileRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Classification of a per-profile scan failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    /// The platform refused the request (HTTP 403)
    Forbidden,

    /// Transport-level failure (connect, TLS, timeout)
    Network,

    /// The worker task itself failed outside the request path
    Unexpected,
}

impl ScanErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::Network => "network",
            Self::Unexpected => "unexpected",
        }
    }
}

/// A failure recorded against a single profile ID
///
/// Scan errors never abort the batch; they accumulate on the
/// [`ScanResult`] and end up in `errors.log`. The `Display` form is the
/// log line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Access forbidden - Check cookie validity! ID: {id}")]
    Forbidden { id: u32 },

    #[error("Error fetching ID {id}: {detail}")]
    Network { id: u32, detail: String },

    #[error("Worker failed for ID {id}: {detail}")]
    Unexpected { id: u32, detail: String },
}

impl ScanError {
    /// The profile ID this error was recorded against
    pub fn id(&self) -> u32 {
        match self {
            Self::Forbidden { id } => *id,
            Self::Network { id, .. } => *id,
            Self::Unexpected { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> ScanErrorKind {
        match self {
            Self::Forbidden { .. } => ScanErrorKind::Forbidden,
            Self::Network { .. } => ScanErrorKind::Network,
            Self::Unexpected { .. } => ScanErrorKind::Unexpected,
        }
    }
}

/// Outcome of attempting a single profile ID
///
/// Exactly one of these is produced per attempted ID, returned by value
/// from the worker task. Failures are data here, not propagated errors.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The page yielded a record with at least one populated field
    Found(ProfileRecord),

    /// The page answered but exposed nothing worth keeping
    Empty { id: u32 },

    /// The attempt failed; the scan carries on
    Failed(ScanError),
}

impl ScanOutcome {
    pub fn id(&self) -> u32 {
        match self {
            Self::Found(record) => record.id,
            Self::Empty { id } => *id,
            Self::Failed(error) => error.id(),
        }
    }
}

/// The frozen aggregate of a completed scan
///
/// Built by the scanner once the worker pool drains; immutable afterwards.
/// `profiles` holds records in completion order, which is why two runs over
/// the same range can legitimately differ in ordering.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// First ID of the scanned range (inclusive)
    pub start_id: u32,

    /// Last ID of the scanned range (inclusive)
    pub end_id: u32,

    /// Records kept, in completion order
    pub profiles: Vec<ProfileRecord>,

    /// Failures recorded during the scan, in completion order
    pub errors: Vec<ScanError>,

    /// Wall-clock time the scan started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time the scan finished
    pub finished_at: DateTime<Utc>,

    /// Elapsed scan time
    pub duration: Duration,

    /// Number of IDs attempted (always the full range)
    pub total_attempted: u64,
}

impl ScanResult {
    /// Number of profiles kept
    pub fn found_count(&self) -> usize {
        self.profiles.len()
    }

    /// Number of failures recorded
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_error_line() {
        let error = ScanError::Forbidden { id: 752 };
        assert_eq!(
            error.to_string(),
            "Access forbidden - Check cookie validity! ID: 752"
        );
        assert_eq!(error.kind(), ScanErrorKind::Forbidden);
        assert_eq!(error.id(), 752);
    }

    #[test]
    fn test_network_error_line() {
        let error = ScanError::Network {
            id: 800,
            detail: "connection timed out".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error fetching ID 800: connection timed out"
        );
        assert_eq!(error.kind(), ScanErrorKind::Network);
    }

    #[test]
    fn test_outcome_id() {
        let record = ProfileRecord::new(5);
        assert_eq!(ScanOutcome::Found(record).id(), 5);
        assert_eq!(ScanOutcome::Empty { id: 6 }.id(), 6);
        assert_eq!(
            ScanOutcome::Failed(ScanError::Forbidden { id: 7 }).id(),
            7
        );
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(ScanErrorKind::Forbidden.as_str(), "forbidden");
        assert_eq!(ScanErrorKind::Network.as_str(), "network");
        assert_eq!(ScanErrorKind::Unexpected.as_str(), "unexpected");
    }
}
