//! Configuration management module

pub mod env;
pub mod parser;

// Re-export main functionality
pub use env::{EnvManager, CLIENT_ENV_VARS, SERVER_ENV_VARS};
pub use parser::{ConfigParser, load_server_config, display_client_config};

// Re-export from models for convenience
pub use crate::models::{ClientConfig, ServerConfig};
