use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::SnapshotConfig;
use crate::error::SnapshotError;

/// Wall-clock budget shared by every resource download in a run.
///
/// The budget is checked between downloads, not preemptively: a single slow
/// request can still overshoot by up to its own timeout. Per-request
/// timeouts are clamped to the remaining budget to bound the overshoot.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    started: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// Start a new budget running from now
    pub fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// Whether the budget has been used up
    pub fn exhausted(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    /// Time left before the budget runs out (zero once exhausted)
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.started.elapsed())
    }
}

/// A fetched page: raw bytes plus the declared content type
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Raw response body
    pub bytes: Vec<u8>,

    /// Value of the Content-Type header, if the server sent one
    pub content_type: Option<String>,
}

/// Sequential HTTP fetcher for the page and its resources.
///
/// One reqwest client is built per run and reused for every request; all
/// requests are awaited one at a time, so there is never more than one
/// in-flight download.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    request_timeout: Duration,
}

impl Fetcher {
    /// Build a fetcher from the snapshot configuration
    pub fn new(config: &SnapshotConfig) -> Result<Self, SnapshotError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            request_timeout: config.request_timeout(),
        })
    }

    /// GET the primary page. Network errors, timeouts and non-2xx statuses
    /// are all fatal here.
    pub async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, SnapshotError> {
        ::log::info!("Fetching page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SnapshotError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SnapshotError::Fetch {
                url: url.to_string(),
                source: e,
            })?
            .to_vec();

        ::log::debug!("Fetched {} bytes from {}", bytes.len(), url);

        Ok(FetchedPage {
            bytes,
            content_type,
        })
    }

    /// GET a single resource, with the request timeout clamped to whatever
    /// is left of the run's budget
    pub async fn fetch_resource(
        &self,
        url: &Url,
        budget: &TimeBudget,
    ) -> Result<Vec<u8>, SnapshotError> {
        let timeout = self.request_timeout.min(budget.remaining());
        ::log::debug!("Fetching resource: {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SnapshotError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SnapshotError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        Ok(bytes.to_vec())
    }
}
