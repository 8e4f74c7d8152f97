//! The scan pipeline
//!
//! This module contains the core of the system: fetching profile pages
//! through the shared session, extracting fields from the HTML, and the
//! orchestrator that drives the bounded worker pool across the ID range
//! and aggregates what comes back.

mod fetcher;
mod parser;
mod scanner;

pub use fetcher::{fetch_profile, jittered_delay, FetchOutcome};
pub use parser::parse_profile;
pub use scanner::{run_scan, Scanner};
