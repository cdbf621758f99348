//! Burst Bench
//!
//! A burst HTTP load generator that fires a fixed number of concurrent GET
//! requests at one URL and reports successes, elapsed time and throughput,
//! together with the fixed-body HTTP server it is benchmarked against.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{ClientConfig, ServerConfig, FetchOutcome, FailureKind, RunSummary, OutcomeBreakdown};
pub use client::{Fetcher, HttpFetcher};
pub use executor::BurstExecutor;
pub use server::TargetServer;
pub use output::{SummaryFormatter, PlainFormatter, ColoredFormatter, FormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_TARGET_URL: &str = "http://127.0.0.1:8080/";
    pub const DEFAULT_REQUEST_COUNT: u64 = 2000;
    pub const DEFAULT_EXPECTED_BODY: &str = "ok";
    pub const DEFAULT_ENABLE_COLOR: bool = false;

    pub const DEFAULT_SERVER_BIND: &str = "0.0.0.0";
    pub const DEFAULT_SERVER_PORT: u16 = 8080;
    pub const DEFAULT_SERVER_BODY: &str = "ok";

    pub const MAX_REQUEST_COUNT: u64 = 1_000_000;
    pub const MAX_CONCURRENCY_LIMIT: usize = 1_000_000;
    pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
    pub const MAX_DEADLINE_SECS: u64 = 3600;

    /// Buffered slots in the result channel before senders suspend
    pub const RESULT_CHANNEL_CAPACITY: usize = 64;
}
