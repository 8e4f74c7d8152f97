use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Reads and validates the TOML settings file
///
/// Everything that can be rejected up front is rejected here, before any
/// session is established or request sent.
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Config)` - Parsed and validated settings
/// * `Err(ConfigError)` - The file is unreadable, malformed, or invalid
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use rollcall::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Target: {}", config.target.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[target]
base-url = "https://lms.example.edu"
user-agent = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36"

[auth]
session-cookie = "MoodleSession=abc123"

[output]
results-root = "./results"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.target.base_url, "https://lms.example.edu");
        assert_eq!(
            config.auth.session_cookie.as_deref(),
            Some("MoodleSession=abc123")
        );
        assert_eq!(config.output.results_root, "./results");
    }

    #[test]
    fn test_load_login_mode_config() {
        let config_content = r#"
[target]
base-url = "https://lms.example.edu"
user-agent = "Mozilla/5.0"

[auth]
username = "scanner@example.edu"

[output]
results-root = "./results"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.auth.username.as_deref(), Some("scanner@example.edu"));
        assert!(config.auth.session_cookie.is_none());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[target]
base-url = "ftp://lms.example.edu"
user-agent = "Mozilla/5.0"

[auth]
session-cookie = "MoodleSession=abc123"

[output]
results-root = "./results"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_load_config_missing_auth_mode() {
        let config_content = r#"
[target]
base-url = "https://lms.example.edu"
user-agent = "Mozilla/5.0"

[auth]

[output]
results-root = "./results"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
