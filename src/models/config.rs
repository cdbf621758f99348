//! Configuration data models and validation

use crate::defaults;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use url::Url;

/// Load client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL every fetch task requests
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Number of concurrent fetch tasks to launch
    #[serde(default = "default_request_count")]
    pub request_count: u64,

    /// Response body that counts as a success
    #[serde(default = "default_expected_body")]
    pub expected_body: String,

    /// Per-request timeout; `None` keeps the HTTP client's default behavior
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    /// Run-wide deadline; `None` waits for every outcome
    #[serde(default)]
    pub deadline_seconds: Option<u64>,

    /// Maximum fetches in flight at once; `None` launches every fetch immediately
    #[serde(default)]
    pub concurrency_limit: Option<usize>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            request_count: default_request_count(),
            expected_body: default_expected_body(),
            request_timeout_seconds: None,
            deadline_seconds: None,
            concurrency_limit: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed target URL
    pub fn target(&self) -> Result<Url> {
        Url::parse(&self.target_url)
            .map_err(|e| AppError::config(format!("Invalid target URL '{}': {}", self.target_url, e)))
    }

    /// Per-request timeout as Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Run deadline as Duration
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_seconds.map(Duration::from_secs)
    }

    /// Validate the configuration and return the first error found
    pub fn validate(&self) -> Result<()> {
        if self.target_url.is_empty() {
            return Err(AppError::config("Target URL cannot be empty"));
        }

        let target = self.target()?;
        // The HTTP client is built without a TLS backend
        if target.scheme() != "http" {
            return Err(AppError::config(format!(
                "Target URL must use http (TLS is not supported): {}", self.target_url
            )));
        }
        if target.host_str().is_none() {
            return Err(AppError::config(format!("Target URL must have a host: {}", self.target_url)));
        }

        if self.request_count == 0 {
            return Err(AppError::config("Request count must be greater than 0"));
        }

        if self.request_count > defaults::MAX_REQUEST_COUNT {
            return Err(AppError::config(format!(
                "Request count cannot exceed {}", defaults::MAX_REQUEST_COUNT
            )));
        }

        if let Some(timeout) = self.request_timeout_seconds {
            if timeout == 0 || timeout > defaults::MAX_REQUEST_TIMEOUT_SECS {
                return Err(AppError::config(format!(
                    "Request timeout must be between 1 and {} seconds, got: {}",
                    defaults::MAX_REQUEST_TIMEOUT_SECS, timeout
                )));
            }
        }

        if let Some(deadline) = self.deadline_seconds {
            if deadline == 0 || deadline > defaults::MAX_DEADLINE_SECS {
                return Err(AppError::config(format!(
                    "Run deadline must be between 1 and {} seconds, got: {}",
                    defaults::MAX_DEADLINE_SECS, deadline
                )));
            }
        }

        if let Some(limit) = self.concurrency_limit {
            if limit == 0 || limit > defaults::MAX_CONCURRENCY_LIMIT {
                return Err(AppError::config(format!(
                    "Concurrency limit must be between 1 and {}, got: {}",
                    defaults::MAX_CONCURRENCY_LIMIT, limit
                )));
            }
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key lookup (the process environment in production)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TARGET_URL") {
            self.target_url = url.trim().to_string();
        }

        if let Some(count) = lookup("REQUEST_COUNT") {
            self.request_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid REQUEST_COUNT value '{}': {}", count, e)))?;
        }

        if let Some(expected) = lookup("EXPECTED_BODY") {
            self.expected_body = expected;
        }

        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = Some(timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid REQUEST_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?);
        }

        if let Some(deadline) = lookup("RUN_DEADLINE_SECONDS") {
            self.deadline_seconds = Some(deadline.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid RUN_DEADLINE_SECONDS value '{}': {}", deadline, e)))?);
        }

        if let Some(limit) = lookup("CONCURRENCY_LIMIT") {
            self.concurrency_limit = Some(limit.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid CONCURRENCY_LIMIT value '{}': {}", limit, e)))?);
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Target server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// TCP port to listen on; 0 picks an ephemeral port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Body returned for every request
    #[serde(default = "default_body")]
    pub body: String,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            body: default_body(),
            verbose: false,
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Server config listening on loopback with an ephemeral port
    pub fn loopback(body: impl Into<String>) -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.bind_address.trim().parse()
            .map_err(|e| AppError::config(format!("Invalid bind address '{}': {}", self.bind_address, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.trim().is_empty() {
            return Err(AppError::config("Bind address cannot be empty"));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key lookup
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("SERVER_BIND") {
            self.bind_address = bind.trim().to_string();
        }

        if let Some(port) = lookup("SERVER_PORT") {
            self.port = port.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid SERVER_PORT value '{}': {}", port, e)))?;
        }

        if let Some(body) = lookup("SERVER_BODY") {
            self.body = body;
        }

        Ok(())
    }
}

fn default_target_url() -> String {
    defaults::DEFAULT_TARGET_URL.to_string()
}

fn default_request_count() -> u64 {
    defaults::DEFAULT_REQUEST_COUNT
}

fn default_expected_body() -> String {
    defaults::DEFAULT_EXPECTED_BODY.to_string()
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}

fn default_bind_address() -> String {
    defaults::DEFAULT_SERVER_BIND.to_string()
}

fn default_port() -> u16 {
    defaults::DEFAULT_SERVER_PORT
}

fn default_body() -> String {
    defaults::DEFAULT_SERVER_BODY.to_string()
}
