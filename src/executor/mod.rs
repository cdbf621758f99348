//! Burst execution engine
//!
//! Launches one tokio task per request, all at once, and joins them through a
//! single many-producer/one-consumer result channel. An optional concurrency
//! limit gates the fetches behind a semaphore; tasks are still all spawned up
//! front. Outcomes are folded into
//! the run summary in arrival order. Without a deadline the join waits for
//! every task, so a fetch that never completes stalls the run; with a deadline
//! the fetches still pending when it elapses are counted as timed out and
//! their tasks are aborted.

use crate::{
    client::Fetcher,
    defaults::RESULT_CHANNEL_CAPACITY,
    error::{AppError, Result},
    logging::{LogLevel, Logger},
    models::{ClientConfig, FetchOutcome, RunSummary},
};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

/// Fan-out/join executor for one burst of fetches
pub struct BurstExecutor {
    target: Url,
    request_count: u64,
    expected_body: String,
    deadline: Option<Duration>,
    concurrency_limit: Option<usize>,
    fetcher: Arc<dyn Fetcher>,
    logger: Logger,
}

impl BurstExecutor {
    /// Create an executor from validated client configuration
    pub fn new(config: &ClientConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        Ok(Self {
            target: config.target()?,
            request_count: config.request_count,
            expected_body: config.expected_body.clone(),
            deadline: config.deadline(),
            concurrency_limit: config.concurrency_limit,
            fetcher,
            logger: Logger::new("EXECUTOR"),
        })
    }

    /// Replace the run deadline
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Replace the limit on fetches in flight
    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.concurrency_limit = limit;
        self
    }

    /// Use the given logger for run diagnostics
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Number of fetches one run launches
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Fire every fetch, collect every outcome and summarize the run
    pub async fn run(&self) -> Result<RunSummary> {
        let (tx, mut rx) = mpsc::channel::<FetchOutcome>(RESULT_CHANNEL_CAPACITY);
        let mut summary = RunSummary::new(self.request_count);
        let mut tasks = JoinSet::new();

        self.logger.debug("Launching fetch tasks")
            .field("requests", self.request_count)
            .field("target", self.target.as_str())
            .field("deadline_secs", self.deadline.map(|d| d.as_secs_f64()))
            .field("concurrency_limit", self.concurrency_limit)
            .log()
            .await;

        let limiter = self.concurrency_limit.map(|limit| Arc::new(Semaphore::new(limit)));

        let start = Instant::now();
        let deadline = self.deadline.map(|d| start + d);

        for _ in 0..self.request_count {
            let tx = tx.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let url = self.target.clone();
            let limiter = limiter.clone();
            tasks.spawn(async move {
                // The semaphore is never closed, so acquiring only waits
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome = fetcher.fetch(&url).await;
                // The receiver is gone only after the deadline abandoned this fetch
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        while summary.pending() > 0 {
            let next = match deadline {
                Some(at) => match timeout_at(at, rx.recv()).await {
                    Ok(next) => next,
                    Err(_) => {
                        self.logger.warn("Run deadline elapsed with fetches outstanding")
                            .field("pending", summary.pending())
                            .log()
                            .await;
                        summary.abandon_pending();
                        break;
                    }
                },
                None => rx.recv().await,
            };

            let outcome = next.ok_or_else(|| {
                AppError::internal(format!(
                    "Result channel closed with {} outcomes outstanding",
                    summary.pending()
                ))
            })?;

            if self.logger.would_log(LogLevel::Debug) && !outcome.is_success(&self.expected_body) {
                self.logger.debug("Fetch did not succeed")
                    .field("outcome", &outcome)
                    .log()
                    .await;
            }

            summary.record(&outcome, &self.expected_body);
        }

        let elapsed = start.elapsed();
        tasks.abort_all();

        Ok(summary.finish(elapsed))
    }
}
