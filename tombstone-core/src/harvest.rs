use crate::config::{DEFAULT_DELAY, SiteConfig};
use crate::manifest::{append_urls, init_manifest};
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tombstone_scanner::{Fetcher, ListingPager, PageOutcome, Result};
use tracing::{info, warn};

/// What to do when a listing page fails for any reason other than a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorPolicy {
    /// Stop as if the listing ran out. This is the historical behaviour.
    Exhaust,
    /// Fail the harvest with the transport error.
    Abort,
    /// Fetch the same page again up to `attempts` times, then exhaust.
    Retry { attempts: u32 },
}

/// Attempts per page when `retry` is chosen without an explicit count.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

impl TransportErrorPolicy {
    /// Replace the retry budget. Other policies are returned unchanged.
    pub fn with_attempts(self, attempts: u32) -> Self {
        match self {
            TransportErrorPolicy::Retry { .. } => TransportErrorPolicy::Retry { attempts },
            other => other,
        }
    }
}

impl FromStr for TransportErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exhaust" => Ok(TransportErrorPolicy::Exhaust),
            "abort" => Ok(TransportErrorPolicy::Abort),
            "retry" => Ok(TransportErrorPolicy::Retry {
                attempts: DEFAULT_RETRY_ATTEMPTS,
            }),
            _ => Err(format!("Unknown transport error policy '{}'", s)),
        }
    }
}

/// Why the harvest loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The listing endpoint answered 404.
    Exhausted,
    /// A transport error was treated as the end of the listing.
    TransportError(String),
}

/// Options for configuring a harvest run
pub struct HarvestOptions {
    pub site: SiteConfig,
    pub manifest_path: PathBuf,
    pub delay: Duration,
    pub on_transport_error: TransportErrorPolicy,
    pub show_progress_bars: bool,
}

impl HarvestOptions {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            site: SiteConfig::default(),
            manifest_path: manifest_path.into(),
            delay: DEFAULT_DELAY,
            on_transport_error: TransportErrorPolicy::Exhaust,
            show_progress_bars: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarvestSummary {
    pub pages_fetched: u32,
    pub urls_written: usize,
    pub manifest_path: PathBuf,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Local>,
}

/// Callback for reporting harvest progress
pub type HarvestProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Page through the listing and write every review link to the manifest.
///
/// The manifest is truncated first. Each page's links are appended as soon as
/// the page is parsed, so an aborted run leaves the pages seen so far on disk.
pub async fn execute_harvest(
    options: HarvestOptions,
    progress_callback: Option<HarvestProgressCallback>,
) -> Result<HarvestSummary> {
    let HarvestOptions {
        site,
        manifest_path,
        delay,
        on_transport_error,
        show_progress_bars,
    } = options;

    let started_at = Local::now();
    info!("Starting url harvest into {}", manifest_path.display());

    let listing_url = site.listing_url()?;
    let mut pager = ListingPager::new(Fetcher::new()?, listing_url.as_str(), &site.page_param)?;
    init_manifest(&manifest_path)?;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting harvest...");
        Some(pb)
    } else {
        None
    };

    let retry_budget = match on_transport_error {
        TransportErrorPolicy::Retry { attempts } => attempts,
        _ => 0,
    };
    let mut retries_left = retry_budget;
    let mut pages_fetched = 0u32;
    let mut urls_written = 0usize;

    let stop_reason = loop {
        let Some(outcome) = pager.next_page().await else {
            break StopReason::Exhausted;
        };
        pages_fetched += 1;

        let stop = match outcome {
            PageOutcome::Page { index, urls, .. } => {
                if let Err(e) = append_urls(&manifest_path, &urls) {
                    if let Some(ref pb) = progress_bar {
                        pb.abandon_with_message(format!("Harvest failed on page {}", index));
                    }
                    return Err(e.into());
                }
                urls_written += urls.len();
                retries_left = retry_budget;

                if let Some(ref pb) = progress_bar {
                    pb.set_message(format!("Page {}: {} reviews listed so far", index, urls_written));
                    pb.tick();
                }
                if let Some(ref callback) = progress_callback {
                    callback(format!("Page {}: {} links", index, urls.len()));
                }
                None
            }
            PageOutcome::Exhausted { index } => {
                info!("Listing exhausted at page {}", index);
                Some(StopReason::Exhausted)
            }
            PageOutcome::TransportError { index, error } => match on_transport_error {
                TransportErrorPolicy::Abort => {
                    if let Some(ref pb) = progress_bar {
                        pb.abandon_with_message(format!("Harvest failed on page {}", index));
                    }
                    return Err(error);
                }
                TransportErrorPolicy::Retry { .. } if retries_left > 0 => {
                    retries_left -= 1;
                    warn!(
                        "Page {} failed ({}), retrying ({} left)",
                        index, error, retries_left
                    );
                    pager.rewind();
                    None
                }
                _ => {
                    warn!(
                        "Page {} failed ({}), treating as end of listing",
                        index, error
                    );
                    pager.finish();
                    Some(StopReason::TransportError(error.to_string()))
                }
            },
        };

        tokio::time::sleep(delay).await;

        if let Some(reason) = stop {
            break reason;
        }
    };

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Harvest complete! {} URLs from {} pages",
            urls_written, pages_fetched
        ));
    }
    info!("finished url harvest: {} urls", urls_written);

    Ok(HarvestSummary {
        pages_fetched,
        urls_written,
        manifest_path,
        stop_reason,
        started_at,
    })
}
