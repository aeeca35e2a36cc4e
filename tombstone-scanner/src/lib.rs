pub mod client;
pub mod error;
pub mod listing;
pub mod result;
pub mod review;
pub mod selectors;

pub use client::Fetcher;
pub use error::{Result, ScanError};
pub use listing::ListingPager;
pub use result::{PageFetchResult, PageOutcome, REVIEW_HEADER, ReviewRecord};
pub use review::{extract_review, sanitize_text};
pub use selectors::{CompiledSelectors, SelectorTable};
