use crate::error::{Result, ScanError};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Anchor of each review on a listing page.
pub const REVIEW_LINK_SELECTOR: &str = ".review > a";

/// CSS selectors for every extracted review field.
///
/// These track the review site's current markup and are expected to drift,
/// so the whole table can be loaded from JSON. Keys left out of the JSON keep
/// their default selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorTable {
    pub artist: String,
    pub album_name: String,
    pub score: String,
    pub genre: String,
    pub date_posted: String,
    pub author: String,
    pub author_title: String,
    pub labels: String,
    pub year_released: String,
    pub review_body: String,
    pub pull_quote: String,
    pub is_best_new_music: String,
    pub is_collection: String,
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self {
            artist: ".single-album-tombstone__artist-links a".to_string(),
            album_name: ".single-album-tombstone__review-title".to_string(),
            score: ".score".to_string(),
            genre: ".genre-list__link".to_string(),
            date_posted: ".article-meta--reviews time".to_string(),
            author: ".authors-detail__display-name".to_string(),
            author_title: ".authors-detail__title".to_string(),
            labels: ".labels-list li".to_string(),
            year_released: ".single-album-tombstone__meta-year".to_string(),
            review_body: ".contents p".to_string(),
            pull_quote: ".review-detail__abstract > p".to_string(),
            is_best_new_music: ".bnm-arrows".to_string(),
            is_collection: ".album-picker".to_string(),
        }
    }
}

impl SelectorTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse every selector up front so a typo fails before any request.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            artist: parse_selector("artist", &self.artist)?,
            album_name: parse_selector("albumName", &self.album_name)?,
            score: parse_selector("score", &self.score)?,
            genre: parse_selector("genre", &self.genre)?,
            date_posted: parse_selector("datePosted", &self.date_posted)?,
            author: parse_selector("author", &self.author)?,
            author_title: parse_selector("authorTitle", &self.author_title)?,
            labels: parse_selector("labels", &self.labels)?,
            year_released: parse_selector("yearReleased", &self.year_released)?,
            review_body: parse_selector("reviewBody", &self.review_body)?,
            pull_quote: parse_selector("pullQuote", &self.pull_quote)?,
            is_best_new_music: parse_selector("isBestNewMusic", &self.is_best_new_music)?,
            is_collection: parse_selector("isCollection", &self.is_collection)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub artist: Selector,
    pub album_name: Selector,
    pub score: Selector,
    pub genre: Selector,
    pub date_posted: Selector,
    pub author: Selector,
    pub author_title: Selector,
    pub labels: Selector,
    pub year_released: Selector,
    pub review_body: Selector,
    pub pull_quote: Selector,
    pub is_best_new_music: Selector,
    pub is_collection: Selector,
}

pub fn parse_selector(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScanError::InvalidSelector {
        field: field.to_string(),
        selector: selector.to_string(),
    })
}
