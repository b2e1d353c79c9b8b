//! Configuration management for the receipt form server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is read through `dotenvy`, which never writes to stdout (MCP uses
//! stdout for communication).

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the receipt form server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Receipt service base URL. Verification and download are unavailable
    /// without it; phone formatting works regardless.
    pub receipt_api_url: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// How long an error alert stays visible, in milliseconds (default: 5000)
    pub error_alert_timeout_ms: u64,

    /// How long a success toast stays visible, in milliseconds (default: 3000)
    pub success_alert_timeout_ms: u64,

    /// Delay before the download button leaves its loading state (default: 3000)
    pub download_reset_ms: u64,

    /// Directory downloaded receipts are written to (default: ".")
    pub download_dir: PathBuf,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `RECEIPT_API_BASE_URL`: Base URL of the receipt service
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `ERROR_ALERT_TIMEOUT_MS`: Error alert lifetime (default: 5000)
    /// - `SUCCESS_ALERT_TIMEOUT_MS`: Success toast lifetime (default: 3000)
    /// - `DOWNLOAD_RESET_MS`: Download button reset delay (default: 3000)
    /// - `RECEIPT_DOWNLOAD_DIR`: Where downloaded PDFs go (default: ".")
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy does not print to stdout
        load_env_file(dotenvy::dotenv())?;

        let receipt_api_url = match env::var("RECEIPT_API_BASE_URL") {
            Ok(url) if url.trim().is_empty() => None,
            Ok(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: "RECEIPT_API_BASE_URL".to_string(),
                        reason: "Must start with http:// or https://".to_string(),
                    });
                }
                Some(url)
            }
            Err(_) => None,
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let error_alert_timeout_ms = Self::parse_env_u64("ERROR_ALERT_TIMEOUT_MS", 5000)?;
        let success_alert_timeout_ms = Self::parse_env_u64("SUCCESS_ALERT_TIMEOUT_MS", 3000)?;
        let download_reset_ms = Self::parse_env_u64("DOWNLOAD_RESET_MS", 3000)?;

        let download_dir = env::var("RECEIPT_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            receipt_api_url,
            request_timeout,
            error_alert_timeout_ms,
            success_alert_timeout_ms,
            download_reset_ms,
            download_dir,
            log_level,
        })
    }

    /// Error alert lifetime.
    pub fn error_alert_ttl(&self) -> Duration {
        Duration::from_millis(self.error_alert_timeout_ms)
    }

    /// Success toast lifetime.
    pub fn success_alert_ttl(&self) -> Duration {
        Duration::from_millis(self.success_alert_timeout_ms)
    }

    /// Download button reset delay.
    pub fn download_reset_delay(&self) -> Duration {
        Duration::from_millis(self.download_reset_ms)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

/// Accept the outcome of loading a `.env` file. A missing file is fine; an
/// unreadable or malformed one is an error.
fn load_env_file<T>(result: dotenvy::Result<T>) -> ConfigResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::DotenvError(e.to_string())),
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            receipt_api_url: None,
            request_timeout: 10,
            error_alert_timeout_ms: 5000,
            success_alert_timeout_ms: 3000,
            download_reset_ms: 3000,
            download_dir: PathBuf::from("."),
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 7] = [
        "RECEIPT_API_BASE_URL",
        "REQUEST_TIMEOUT",
        "ERROR_ALERT_TIMEOUT_MS",
        "SUCCESS_ALERT_TIMEOUT_MS",
        "DOWNLOAD_RESET_MS",
        "RECEIPT_DOWNLOAD_DIR",
        "LOG_LEVEL",
    ];

    // Sets env vars for one test and removes every config var on drop
    struct EnvGuard;

    impl EnvGuard {
        fn new() -> Self {
            for var in VARS {
                env::remove_var(var);
            }
            EnvGuard
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.receipt_api_url.is_none());
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.error_alert_ttl(), Duration::from_secs(5));
        assert_eq!(config.success_alert_ttl(), Duration::from_secs(3));
        assert_eq!(config.download_reset_delay(), Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("RECEIPT_API_BASE_URL", "https://receipts.example.com");
        guard.set("ERROR_ALERT_TIMEOUT_MS", "2500");
        guard.set("RECEIPT_DOWNLOAD_DIR", "/tmp/receipts");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.receipt_api_url.as_deref(),
            Some("https://receipts.example.com")
        );
        assert_eq!(config.error_alert_timeout_ms, 2500);
        assert_eq!(config.success_alert_timeout_ms, 3000);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/receipts"));
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("RECEIPT_API_BASE_URL", "not-a-url");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "RECEIPT_API_BASE_URL")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_blank_url_means_unconfigured() {
        let mut guard = EnvGuard::new();
        guard.set("RECEIPT_API_BASE_URL", "  ");

        let config = Config::from_env().unwrap();
        assert!(config.receipt_api_url.is_none());
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "0");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "REQUEST_TIMEOUT"
        ));
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("DOWNLOAD_RESET_MS", "42");

        assert_eq!(Config::parse_env_u64("DOWNLOAD_RESET_MS", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("NONEXISTENT_RECEIPT_VAR", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("DOWNLOAD_RESET_MS", "soon");

        assert!(Config::parse_env_u64("DOWNLOAD_RESET_MS", 10).is_err());
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let result = dotenvy::from_path(dir.path().join(".env"));
        assert!(load_env_file(result).is_ok());
    }

    #[test]
    #[serial]
    fn test_malformed_env_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "RECEIPT API BASE URL\n").unwrap();

        let result = load_env_file(dotenvy::from_path(&path));
        assert!(matches!(result, Err(ConfigError::DotenvError(_))));
    }
}
