//! Rollcall: a concurrent profile enumerator for Moodle-style platforms
//!
//! This crate walks a numeric range of user-profile IDs on a learning
//! management platform, fetching each profile page over an authenticated
//! session with bounded concurrency and jittered pacing, extracting the
//! visible fields, and writing aggregated reports to disk.

pub mod auth;
pub mod config;
pub mod model;
pub mod report;
pub mod scan;

use thiserror::Error;

/// Main error type for rollcall operations
#[derive(Debug, Error)]
pub enum RollcallError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] auth::AuthError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

/// Result type alias for rollcall operations
pub type Result<T> = std::result::Result<T, RollcallError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use auth::{Credentials, Session};
pub use config::{Config, ScanConfig, TargetConfig};
pub use model::{ProfileRecord, ScanError, ScanErrorKind, ScanOutcome, ScanResult};
pub use report::ScanStatistics;
pub use scan::Scanner;
