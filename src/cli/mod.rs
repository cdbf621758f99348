//! Command-line interfaces for the client and server binaries

use crate::config::env::{EnvManager, CLIENT_ENV_VARS, SERVER_ENV_VARS};
use clap::{Command, CommandFactory, FromArgMatches, Parser};

/// Burst client - fires concurrent GET requests at one URL and reports throughput
#[derive(Parser, Debug, Clone)]
#[command(name = "burst-client")]
#[command(version, about, long_about = None)]
pub struct ClientCli {
    /// Target URL for every request [default: http://127.0.0.1:8080/]
    #[arg(long)]
    pub url: Option<String>,

    /// Number of concurrent requests to launch [default: 2000]
    #[arg(short = 'n', long = "requests")]
    pub requests: Option<u64>,

    /// Response body counted as a success [default: ok]
    #[arg(long = "expect", value_name = "BODY")]
    pub expect: Option<String>,

    /// Per-request timeout in seconds (unset: no timeout)
    #[arg(long, value_parser = parse_request_timeout)]
    pub timeout: Option<u64>,

    /// Give up on pending requests after this many seconds (unset: wait forever)
    #[arg(long, value_parser = parse_deadline)]
    pub deadline: Option<u64>,

    /// Maximum requests in flight at once (unset: launch all immediately)
    #[arg(short = 'c', long = "concurrency", value_parser = clap::value_parser!(usize))]
    pub concurrency: Option<usize>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the failure breakdown after the summary line
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl ClientCli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }
        Ok(())
    }

    /// Command definition with the supported environment variables in the long help
    pub fn command_with_env_help() -> Command {
        Self::command().after_long_help(EnvManager::env_help(CLIENT_ENV_VARS))
    }

    /// Parse process arguments, exiting with clap's usage error on failure
    pub fn parse_args() -> Self {
        parse_or_exit(Self::command_with_env_help())
    }

    /// Explicit color choice, if any flag was given
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }
}

/// Burst target server - answers every request with a fixed body
#[derive(Parser, Debug, Clone)]
#[command(name = "burst-server")]
#[command(version, about, long_about = None)]
pub struct ServerCli {
    /// Interface address to listen on [default: 0.0.0.0]
    #[arg(long)]
    pub bind: Option<String>,

    /// TCP port to listen on [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Body returned for every request [default: ok]
    #[arg(long)]
    pub body: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl ServerCli {
    /// Command definition with the supported environment variables in the long help
    pub fn command_with_env_help() -> Command {
        Self::command().after_long_help(EnvManager::env_help(SERVER_ENV_VARS))
    }

    /// Parse process arguments, exiting with clap's usage error on failure
    pub fn parse_args() -> Self {
        parse_or_exit(Self::command_with_env_help())
    }
}

fn parse_or_exit<T: FromArgMatches>(command: Command) -> T {
    let mut matches = command.get_matches();
    T::from_arg_matches_mut(&mut matches).unwrap_or_else(|e| e.exit())
}

fn parse_request_timeout(s: &str) -> Result<u64, String> {
    parse_seconds(s, crate::defaults::MAX_REQUEST_TIMEOUT_SECS)
}

fn parse_deadline(s: &str) -> Result<u64, String> {
    parse_seconds(s, crate::defaults::MAX_DEADLINE_SECS)
}

/// Parse a whole number of seconds within 1..=max
fn parse_seconds(s: &str, max: u64) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > max {
                Err(format!("Duration cannot exceed {} seconds", max))
            } else {
                Ok(secs)
            }
        })
}
