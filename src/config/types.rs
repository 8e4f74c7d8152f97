use crate::config::validation::validate_scan_params;
use crate::ConfigResult;
use serde::Deserialize;
use std::time::Duration;

/// Upper bound on the random jitter added to each request delay
pub const DEFAULT_JITTER: Duration = Duration::from_millis(500);

/// Main configuration structure for Rollcall
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    pub auth: AuthConfig,
    pub output: OutputConfig,
}

/// Target platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the platform (e.g., "https://lms.example.edu")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl TargetConfig {
    /// Returns the profile page URL for the given user ID
    pub fn profile_url(&self, id: u32) -> String {
        format!(
            "{}/user/profile.php?id={}",
            self.base_url.trim_end_matches('/'),
            id
        )
    }

    /// Returns the login page URL
    pub fn login_url(&self) -> String {
        format!("{}/login/index.php", self.base_url.trim_end_matches('/'))
    }
}

/// Session authentication configuration
///
/// Exactly one mode must be set: a pre-captured session cookie, or a
/// username whose password is resolved from the environment at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Raw Cookie header value from an existing browser session
    #[serde(rename = "session-cookie")]
    pub session_cookie: Option<String>,

    /// Account name for form-based login
    pub username: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory under which each run writes its timestamped results
    #[serde(rename = "results-root")]
    pub results_root: String,
}

/// Scan parameters supplied on the command line
///
/// Immutable once constructed; `new` rejects out-of-range values.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// First user ID to probe (inclusive)
    pub start_id: u32,

    /// Last user ID to probe (inclusive)
    pub end_id: u32,

    /// Maximum number of profile fetches in flight at once
    pub concurrency: usize,

    /// Baseline pause before each request
    pub delay: Duration,

    /// Upper bound on the uniform random jitter added to `delay`
    pub jitter_max: Duration,
}

impl ScanConfig {
    /// Builds a validated scan configuration from raw argument values
    ///
    /// # Arguments
    ///
    /// * `start_id` - First user ID (inclusive)
    /// * `end_id` - Last user ID (inclusive)
    /// * `concurrency` - Worker pool size
    /// * `delay_secs` - Baseline per-request delay in seconds
    ///
    /// # Returns
    ///
    /// * `Ok(ScanConfig)` - Parameters within accepted ranges
    /// * `Err(ConfigError)` - A parameter was out of range
    pub fn new(
        start_id: u32,
        end_id: u32,
        concurrency: usize,
        delay_secs: f64,
    ) -> ConfigResult<Self> {
        validate_scan_params(start_id, end_id, concurrency, delay_secs)?;
        Ok(ScanConfig {
            start_id,
            end_id,
            concurrency,
            delay: Duration::from_secs_f64(delay_secs),
            jitter_max: DEFAULT_JITTER,
        })
    }

    /// Number of IDs the scan will attempt
    pub fn total_ids(&self) -> u64 {
        u64::from(self.end_id) - u64::from(self.start_id) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url_strips_trailing_slash() {
        let target = TargetConfig {
            base_url: "https://lms.example.edu/".to_string(),
            user_agent: "test".to_string(),
        };
        assert_eq!(
            target.profile_url(42),
            "https://lms.example.edu/user/profile.php?id=42"
        );
    }

    #[test]
    fn test_login_url() {
        let target = TargetConfig {
            base_url: "https://lms.example.edu".to_string(),
            user_agent: "test".to_string(),
        };
        assert_eq!(target.login_url(), "https://lms.example.edu/login/index.php");
    }

    #[test]
    fn test_scan_config_total_ids() {
        let scan = ScanConfig::new(750, 1000, 5, 0.5).unwrap();
        assert_eq!(scan.total_ids(), 251);
        assert_eq!(scan.jitter_max, DEFAULT_JITTER);
    }

    #[test]
    fn test_scan_config_single_id() {
        let scan = ScanConfig::new(7, 7, 1, 0.0).unwrap();
        assert_eq!(scan.total_ids(), 1);
        assert_eq!(scan.delay, Duration::ZERO);
    }
}
