use crate::config::types::{AuthConfig, Config, OutputConfig, TargetConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_target_config(&config.target)?;
    validate_auth_config(&config.auth)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates target platform configuration
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    if config.base_url.is_empty() {
        return Err(ConfigError::Validation(
            "base_url cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates authentication configuration
///
/// Exactly one mode must be configured: a session cookie or a username.
fn validate_auth_config(config: &AuthConfig) -> Result<(), ConfigError> {
    match (&config.session_cookie, &config.username) {
        (Some(cookie), None) => {
            if cookie.is_empty() {
                return Err(ConfigError::Validation(
                    "session_cookie cannot be empty".to_string(),
                ));
            }
            Ok(())
        }
        (None, Some(username)) => {
            if username.is_empty() {
                return Err(ConfigError::Validation(
                    "username cannot be empty".to_string(),
                ));
            }
            Ok(())
        }
        (Some(_), Some(_)) => Err(ConfigError::Validation(
            "set either session-cookie or username, not both".to_string(),
        )),
        (None, None) => Err(ConfigError::Validation(
            "auth requires a session-cookie or a username".to_string(),
        )),
    }
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_root.is_empty() {
        return Err(ConfigError::Validation(
            "results_root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates raw scan parameters before they become a `ScanConfig`
pub fn validate_scan_params(
    start_id: u32,
    end_id: u32,
    concurrency: usize,
    delay_secs: f64,
) -> Result<(), ConfigError> {
    if start_id > end_id {
        return Err(ConfigError::Validation(format!(
            "start ID must be <= end ID, got {}..{}",
            start_id, end_id
        )));
    }

    if concurrency < 1 || concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            concurrency
        )));
    }

    if !delay_secs.is_finite() || !(0.0..=600.0).contains(&delay_secs) {
        return Err(ConfigError::Validation(format!(
            "delay must be between 0 and 600 seconds, got {}",
            delay_secs
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(base_url: &str) -> TargetConfig {
        TargetConfig {
            base_url: base_url.to_string(),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }

    #[test]
    fn test_validate_target_config() {
        assert!(validate_target_config(&target("https://lms.example.edu")).is_ok());
        assert!(validate_target_config(&target("http://10.0.0.5:8080")).is_ok());

        assert!(validate_target_config(&target("")).is_err());
        assert!(validate_target_config(&target("not a url")).is_err());
        assert!(validate_target_config(&target("ftp://lms.example.edu")).is_err());
    }

    #[test]
    fn test_validate_auth_config_modes() {
        let cookie_mode = AuthConfig {
            session_cookie: Some("MoodleSession=abc".to_string()),
            username: None,
        };
        assert!(validate_auth_config(&cookie_mode).is_ok());

        let login_mode = AuthConfig {
            session_cookie: None,
            username: Some("scanner@example.edu".to_string()),
        };
        assert!(validate_auth_config(&login_mode).is_ok());

        let both = AuthConfig {
            session_cookie: Some("MoodleSession=abc".to_string()),
            username: Some("scanner@example.edu".to_string()),
        };
        assert!(validate_auth_config(&both).is_err());

        let neither = AuthConfig {
            session_cookie: None,
            username: None,
        };
        assert!(validate_auth_config(&neither).is_err());
    }

    #[test]
    fn test_validate_scan_params() {
        assert!(validate_scan_params(750, 1000, 5, 0.5).is_ok());
        assert!(validate_scan_params(1, 1, 1, 0.0).is_ok());

        assert!(validate_scan_params(1000, 750, 5, 0.5).is_err());
        assert!(validate_scan_params(1, 10, 0, 0.5).is_err());
        assert!(validate_scan_params(1, 10, 101, 0.5).is_err());
        assert!(validate_scan_params(1, 10, 5, -0.1).is_err());
        assert!(validate_scan_params(1, 10, 5, f64::NAN).is_err());
    }
}
