//! Run summary aggregation

use super::outcome::{FailureKind, FetchOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-cause counts of non-successful fetches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeBreakdown {
    /// 2xx responses whose body was not the expected marker
    pub unexpected_body: u64,
    /// Connection establishment failures
    pub connect: u64,
    /// Non-2xx responses
    pub status: u64,
    /// Body read failures
    pub body: u64,
    /// Other transport failures
    pub request: u64,
    /// Fetches that timed out or were still pending at the deadline
    pub timed_out: u64,
    /// Non-2xx responses grouped by status code
    pub status_codes: BTreeMap<u16, u64>,
}

impl OutcomeBreakdown {
    /// Total number of non-successful fetches
    pub fn total(&self) -> u64 {
        self.unexpected_body + self.connect + self.status + self.body + self.request + self.timed_out
    }

    fn record_failure(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::Connect => self.connect += 1,
            FailureKind::Status(code) => {
                self.status += 1;
                *self.status_codes.entry(code).or_insert(0) += 1;
            }
            FailureKind::Body => self.body += 1,
            FailureKind::Request => self.request += 1,
        }
    }
}

/// Aggregate report for one client run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of fetch tasks launched
    pub total: u64,
    /// Outcomes equal to the expected body
    pub successes: u64,
    /// Outcomes received over the result channel
    pub received: u64,
    /// Fetches still pending when the run deadline elapsed
    pub abandoned: u64,
    /// Wall-clock time from launch to the last receive
    pub elapsed: Duration,
    /// Why the non-successful fetches failed
    pub breakdown: OutcomeBreakdown,
}

impl RunSummary {
    /// Create an empty summary for a run of `total` fetches
    pub fn new(total: u64) -> Self {
        Self {
            total,
            successes: 0,
            received: 0,
            abandoned: 0,
            elapsed: Duration::ZERO,
            breakdown: OutcomeBreakdown::default(),
        }
    }

    /// Fold one received outcome into the summary
    pub fn record(&mut self, outcome: &FetchOutcome, expected: &str) {
        self.received += 1;
        match outcome {
            FetchOutcome::Body { body, .. } if body == expected => self.successes += 1,
            FetchOutcome::Body { .. } => self.breakdown.unexpected_body += 1,
            FetchOutcome::Failed { kind, .. } => self.breakdown.record_failure(*kind),
            FetchOutcome::TimedOut => self.breakdown.timed_out += 1,
        }
    }

    /// Count every fetch that never reported as timed out
    pub fn abandon_pending(&mut self) {
        let pending = self.pending();
        self.abandoned += pending;
        self.breakdown.timed_out += pending;
    }

    /// Set the measured wall-clock duration
    pub fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Fetches neither received nor abandoned yet
    pub fn pending(&self) -> u64 {
        self.total.saturating_sub(self.received + self.abandoned)
    }

    /// Non-successful fetches
    pub fn failures(&self) -> u64 {
        self.breakdown.total()
    }

    /// Successes as a percentage of fetches launched
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successes as f64 * 100.0 / self.total as f64
        }
    }

    /// Elapsed time in fractional seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Fetches launched per second of elapsed time
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.total as f64 / secs
        } else {
            0.0
        }
    }
}
