//! Per-fetch outcome model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a single fetch did not produce a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// TCP connection could not be established
    Connect,
    /// Server answered with a non-2xx status
    Status(u16),
    /// Response headers arrived but the body could not be read
    Body,
    /// Any other transport-level failure
    Request,
}

impl FailureKind {
    /// Short label used in breakdown output and log fields
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Status(_) => "status",
            Self::Body => "body",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "status {}", code),
            other => f.write_str(other.label()),
        }
    }
}

/// Result of one fetch task, sent once over the result channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// A 2xx response whose body was read in full
    Body {
        status: u16,
        body: String,
    },
    /// The fetch failed before a usable body was obtained
    Failed {
        kind: FailureKind,
        message: String,
    },
    /// No outcome arrived before the run deadline, or the client timed out
    TimedOut,
}

impl FetchOutcome {
    /// Create a body outcome
    pub fn body<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Body { status, body: body.into() }
    }

    /// Create a failed outcome
    pub fn failed<S: Into<String>>(kind: FailureKind, message: S) -> Self {
        Self::Failed { kind, message: message.into() }
    }

    /// True when the fetch returned exactly the expected body
    pub fn is_success(&self, expected: &str) -> bool {
        matches!(self, Self::Body { body, .. } if body == expected)
    }

    /// Failure kind, if this outcome is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
