//! Configuration module for Rollcall
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus the scan parameters supplied on the command line.
//!
//! # Example
//!
//! ```no_run
//! use rollcall::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scanning {}", config.target.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AuthConfig, Config, OutputConfig, ScanConfig, TargetConfig, DEFAULT_JITTER};

// Re-export parser functions
pub use parser::load_config;
