use std::time::Duration;
use tombstone_scanner::{Result, ScanError};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pitchfork.com";
pub const DEFAULT_LISTING_PATH: &str = "/reviews/albums/";
pub const DEFAULT_PAGE_PARAM: &str = "page";
pub const DEFAULT_MANIFEST_FILE: &str = "pitchfork-urls.txt";
pub const DEFAULT_DATA_FILE: &str = "pitchfork-data.csv";

/// Pause between consecutive requests of either stage.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Where the review site lives and how its listing is paginated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
    pub listing_path: String,
    pub page_param: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", self.base_url, e)))
    }

    pub fn listing_url(&self) -> Result<Url> {
        self.base()?
            .join(&self.listing_path)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", self.listing_path, e)))
    }

    /// Resolve a manifest line against the site origin. Absolute URLs pass
    /// through, paths are joined onto the base.
    pub fn resolve(&self, link: &str) -> Result<String> {
        self.base()?
            .join(link)
            .map(|url| url.to_string())
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", link, e)))
    }
}
