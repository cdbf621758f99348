//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{ClientCli, ServerCli},
    config::env::{EnvManager, CLIENT_ENV_VARS, SERVER_ENV_VARS},
    error::{AppError, Result},
    models::{ClientConfig, ServerConfig},
};

/// Builds configuration from defaults, .env, the environment and CLI flags, in that order
pub struct ConfigParser {
    env_file_loaded: bool,
}

impl ConfigParser {
    /// Create a parser, loading .env from the working directory if present
    pub fn new() -> Result<Self> {
        let env_file_loaded = EnvManager::load_env_file()?;
        Ok(Self { env_file_loaded })
    }

    /// Whether a .env file contributed to the configuration
    pub fn env_file_loaded(&self) -> bool {
        self.env_file_loaded
    }

    /// Parse and validate the client configuration
    pub fn parse_client(&self, cli: &ClientCli) -> Result<ClientConfig> {
        cli.validate().map_err(AppError::config)?;

        EnvManager::validate_present(CLIENT_ENV_VARS)?;
        let mut config = ClientConfig::default();
        config.merge_from_env()?;
        apply_client_overrides(cli, &mut config);
        config.validate()?;

        Ok(config)
    }

    /// Parse and validate the server configuration
    pub fn parse_server(&self, cli: &ServerCli) -> Result<ServerConfig> {
        EnvManager::validate_present(SERVER_ENV_VARS)?;
        let mut config = ServerConfig::default();
        config.merge_from_env()?;
        apply_server_overrides(cli, &mut config);
        config.validate()?;

        Ok(config)
    }
}

/// Apply CLI argument overrides to the client configuration
pub fn apply_client_overrides(cli: &ClientCli, config: &mut ClientConfig) {
    if let Some(ref url) = cli.url {
        config.target_url = url.clone();
    }

    if let Some(requests) = cli.requests {
        config.request_count = requests;
    }

    if let Some(ref expect) = cli.expect {
        config.expected_body = expect.clone();
    }

    if cli.timeout.is_some() {
        config.request_timeout_seconds = cli.timeout;
    }

    if cli.deadline.is_some() {
        config.deadline_seconds = cli.deadline;
    }

    if cli.concurrency.is_some() {
        config.concurrency_limit = cli.concurrency;
    }

    if let Some(color) = cli.color_override() {
        config.enable_color = color;
    }

    // CLI-only flags
    config.verbose = cli.verbose;
    config.debug = cli.debug;
}

/// Apply CLI argument overrides to the server configuration
pub fn apply_server_overrides(cli: &ServerCli, config: &mut ServerConfig) {
    if let Some(ref bind) = cli.bind {
        config.bind_address = bind.clone();
    }

    if let Some(port) = cli.port {
        config.port = port;
    }

    if let Some(ref body) = cli.body {
        config.body = body.clone();
    }

    config.verbose = cli.verbose;
    config.debug = cli.debug;
}

/// Convenience function to load the server configuration from CLI arguments
pub fn load_server_config(cli: &ServerCli) -> Result<ServerConfig> {
    ConfigParser::new()?.parse_server(cli)
}

/// Client configuration summary for debug output
pub fn display_client_config(config: &ClientConfig) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Target URL: {}", config.target_url));
    summary.push(format!("Requests: {}", config.request_count));
    summary.push(format!("Expected body: {:?}", config.expected_body));
    summary.push(format!(
        "Request timeout: {}",
        config.request_timeout_seconds.map_or("none".to_string(), |s| format!("{}s", s))
    ));
    summary.push(format!(
        "Run deadline: {}",
        config.deadline_seconds.map_or("none".to_string(), |s| format!("{}s", s))
    ));
    summary.push(format!(
        "Concurrency limit: {}",
        config.concurrency_limit.map_or("unbounded".to_string(), |n| n.to_string())
    ));
    summary.push(format!("Color Output: {}", config.enable_color));

    summary.join("\n")
}
