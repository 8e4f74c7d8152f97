//! Data model for scan results
//!
//! Plain data types shared between the scanner and the report writers:
//! extracted profile records, per-ID outcome tags, and the frozen
//! aggregate a finished scan hands to the output layer.

mod outcome;
mod profile;

pub use outcome::{ScanError, ScanErrorKind, ScanOutcome, ScanResult};
pub use profile::ProfileRecord;
