use crate::error::ScanError;
use serde::{Deserialize, Serialize};

/// Column names of the review data file, in record order.
pub const REVIEW_HEADER: [&str; 15] = [
    "ID",
    "Artist",
    "Album Name",
    "Score",
    "Genre",
    "Date Posted",
    "Author",
    "Author Title",
    "Label",
    "Year Released",
    "Pull Quote",
    "Review Body",
    "Word Count",
    "Is Best New Music",
    "Is Collection",
];

/// Raw outcome of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetchResult {
    pub body: Option<String>,
    pub status_code: u16,
}

impl PageFetchResult {
    pub fn new(body: Option<String>, status_code: u16) -> Self {
        Self { body, status_code }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// One step of the listing pager.
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was fetched; `urls` may be empty.
    Page {
        index: u32,
        status_code: u16,
        urls: Vec<String>,
    },
    /// The listing endpoint answered 404 for this index.
    Exhausted { index: u32 },
    /// Network failure or a non-success status other than 404.
    TransportError { index: u32, error: ScanError },
}

impl PageOutcome {
    pub fn index(&self) -> u32 {
        match self {
            PageOutcome::Page { index, .. }
            | PageOutcome::Exhausted { index }
            | PageOutcome::TransportError { index, .. } => *index,
        }
    }

    pub fn urls(&self) -> &[String] {
        match self {
            PageOutcome::Page { urls, .. } => urls,
            _ => &[],
        }
    }
}

/// A single extracted review, serialized as one row under [`REVIEW_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "ID")]
    pub id: usize,
    #[serde(rename = "Artist")]
    pub artist: Option<String>,
    #[serde(rename = "Album Name")]
    pub album_name: Option<String>,
    #[serde(rename = "Score")]
    pub score: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Date Posted")]
    pub date_posted: Option<String>,
    #[serde(rename = "Author")]
    pub author: Option<String>,
    #[serde(rename = "Author Title")]
    pub author_title: Option<String>,
    #[serde(rename = "Label")]
    pub labels: String,
    #[serde(rename = "Year Released")]
    pub year_released: String,
    #[serde(rename = "Pull Quote")]
    pub pull_quote: Option<String>,
    #[serde(rename = "Review Body")]
    pub review_body: String,
    #[serde(rename = "Word Count")]
    pub word_count: usize,
    #[serde(rename = "Is Best New Music")]
    pub is_best_new_music: bool,
    #[serde(rename = "Is Collection")]
    pub is_collection: bool,
}
