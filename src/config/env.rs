//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Variables read by the load client
pub const CLIENT_ENV_VARS: &[&str] = &[
    "TARGET_URL",
    "REQUEST_COUNT",
    "EXPECTED_BODY",
    "REQUEST_TIMEOUT_SECONDS",
    "RUN_DEADLINE_SECONDS",
    "CONCURRENCY_LIMIT",
    "ENABLE_COLOR",
];

/// Variables read by the target server
pub const SERVER_ENV_VARS: &[&str] = &["SERVER_BIND", "SERVER_PORT", "SERVER_BODY"];

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists; returns whether a file was loaded
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;
        Ok(true)
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "TARGET_URL" => {
                let url = url::Url::parse(value.trim())
                    .map_err(|e| AppError::config(format!("Invalid TARGET_URL '{}': {}", value, e)))?;
                if url.scheme() != "http" {
                    return Err(AppError::config(format!("TARGET_URL must use http (TLS is not supported): {}", value)));
                }
            }
            "REQUEST_COUNT" => {
                let count: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid REQUEST_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > crate::defaults::MAX_REQUEST_COUNT {
                    return Err(AppError::config(format!(
                        "REQUEST_COUNT must be between 1 and {}, got: {}",
                        crate::defaults::MAX_REQUEST_COUNT, count
                    )));
                }
            }
            "REQUEST_TIMEOUT_SECONDS" => {
                Self::validate_seconds(key, value, crate::defaults::MAX_REQUEST_TIMEOUT_SECS)?;
            }
            "RUN_DEADLINE_SECONDS" => {
                Self::validate_seconds(key, value, crate::defaults::MAX_DEADLINE_SECS)?;
            }
            "CONCURRENCY_LIMIT" => {
                let limit: usize = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid CONCURRENCY_LIMIT value '{}': {}", value, e)))?;
                if limit == 0 || limit > crate::defaults::MAX_CONCURRENCY_LIMIT {
                    return Err(AppError::config(format!(
                        "CONCURRENCY_LIMIT must be between 1 and {}, got: {}",
                        crate::defaults::MAX_CONCURRENCY_LIMIT, limit
                    )));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            "SERVER_BIND" => {
                value.trim().parse::<std::net::IpAddr>()
                    .map_err(|e| AppError::config(format!("Invalid SERVER_BIND value '{}': {}", value, e)))?;
            }
            "SERVER_PORT" => {
                value.trim().parse::<u16>()
                    .map_err(|e| AppError::config(format!("Invalid SERVER_PORT value '{}': {}", value, e)))?;
            }
            _ => {
                // EXPECTED_BODY, SERVER_BODY and unknown keys accept any text
            }
        }

        Ok(())
    }

    /// Help text listing `keys` with their descriptions and example values
    pub fn env_help(keys: &[&str]) -> String {
        let mut lines = vec!["Environment variables (also read from .env):".to_string()];
        for (key, description, example) in Self::supported_env_vars() {
            if keys.contains(&key) {
                lines.push(format!("  {:<25}{} (e.g. {})", key, description, example));
            }
        }
        lines.join("\n")
    }

    /// Validate whichever of `keys` are set in the process environment
    pub fn validate_present(keys: &[&str]) -> Result<()> {
        for key in keys {
            if let Ok(value) = std::env::var(key) {
                Self::validate_env_var(key, &value)?;
            }
        }
        Ok(())
    }

    fn validate_seconds(key: &str, value: &str, max: u64) -> Result<()> {
        let secs: u64 = value.trim().parse()
            .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
        if secs == 0 || secs > max {
            return Err(AppError::config(format!("{} must be between 1 and {}, got: {}", key, max, secs)));
        }
        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("TARGET_URL", "URL requested by every client task", "http://127.0.0.1:8080/"),
            ("REQUEST_COUNT", "Number of concurrent requests", "2000"),
            ("EXPECTED_BODY", "Response body counted as success", "ok"),
            ("REQUEST_TIMEOUT_SECONDS", "Per-request timeout (1-300)", "10"),
            ("RUN_DEADLINE_SECONDS", "Run-wide deadline (1-3600)", "60"),
            ("CONCURRENCY_LIMIT", "Maximum requests in flight", "500"),
            ("ENABLE_COLOR", "Enable colored output", "false"),
            ("SERVER_BIND", "Server listen address", "0.0.0.0"),
            ("SERVER_PORT", "Server listen port", "8080"),
            ("SERVER_BODY", "Body the server returns", "ok"),
        ]
    }
}
