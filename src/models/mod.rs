//! Data models for burst-bench

pub mod config;
pub mod outcome;
pub mod summary;

// Re-export main model types
pub use config::{ClientConfig, ServerConfig};
pub use outcome::{FailureKind, FetchOutcome};
pub use summary::{OutcomeBreakdown, RunSummary};
