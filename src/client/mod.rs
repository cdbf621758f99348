//! HTTP fetching for the load client


use crate::{
    error::Result,
    models::{ClientConfig, FailureKind, FetchOutcome},
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Performs one fetch and reports its outcome; implementations never fail
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET the URL and read the whole body
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// `Fetcher` backed by a single shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    request_timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher; `None` leaves requests without a timeout
    pub fn new(request_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("burst-bench/", env!("CARGO_PKG_VERSION")))
            .no_proxy();

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self { client, request_timeout })
    }

    /// Create a fetcher from client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.request_timeout())
    }

    /// Per-request timeout in effect
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return classify_send_error(&e),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::failed(FailureKind::Status(status.as_u16()), format!("HTTP {}", status));
        }

        match response.text().await {
            Ok(body) => FetchOutcome::body(status.as_u16(), body),
            Err(e) if e.is_timeout() => FetchOutcome::TimedOut,
            Err(e) => FetchOutcome::failed(FailureKind::Body, e.to_string()),
        }
    }
}

/// Map an error from sending the request onto an outcome
fn classify_send_error(error: &reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::TimedOut
    } else if error.is_connect() {
        FetchOutcome::failed(FailureKind::Connect, error.to_string())
    } else {
        FetchOutcome::failed(FailureKind::Request, error.to_string())
    }
}
