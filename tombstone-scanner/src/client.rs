use crate::error::{Result, ScanError};
use crate::result::PageFetchResult;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Thin GET-only wrapper around a configured reqwest client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tombstone/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ScanError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue a GET and hand back status and body whatever the status is.
    /// Only transport failures surface as errors.
    pub async fn get(&self, url: &str) -> Result<PageFetchResult> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            "{} answered {} in {:?} ({} bytes)",
            url,
            status_code,
            start.elapsed(),
            body.len()
        );

        Ok(PageFetchResult::new(Some(body), status_code))
    }

    /// Like [`Fetcher::get`], but a non-success status is an error too.
    pub async fn get_ok(&self, url: &str) -> Result<PageFetchResult> {
        let page = self.get(url).await?;
        if !page.is_success() {
            return Err(ScanError::Status {
                url: url.to_string(),
                status: page.status_code,
            });
        }
        Ok(page)
    }
}
