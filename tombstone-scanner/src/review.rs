use crate::error::{Result, ScanError};
use crate::result::ReviewRecord;
use crate::selectors::CompiledSelectors;
use scraper::{ElementRef, Html, Selector};

/// Join token for multi-valued fields such as labels and body paragraphs.
pub const MULTI_VALUE_SEPARATOR: &str = ";";

/// Stand-in written for every literal comma in extracted text.
pub const COMMA_TOKEN: &str = "&comma";

/// Extract one review record from a detail page.
///
/// `url` is only used to name the page when a required field is missing.
pub fn extract_review(
    html: &str,
    id: usize,
    selectors: &CompiledSelectors,
    url: &str,
) -> Result<ReviewRecord> {
    let document = Html::parse_document(html);

    let review_body = multi_text(&document, &selectors.review_body);
    let year_released = first_text(&document, &selectors.year_released)
        .map(|year| digits_only(&year))
        .ok_or_else(|| ScanError::RequiredFieldMissing {
            field: "yearReleased",
            url: url.to_string(),
        })?;

    Ok(ReviewRecord {
        id,
        artist: first_text(&document, &selectors.artist),
        album_name: first_text(&document, &selectors.album_name),
        score: first_text(&document, &selectors.score),
        genre: first_text(&document, &selectors.genre),
        date_posted: first_datetime(&document, &selectors.date_posted),
        author: first_text(&document, &selectors.author),
        author_title: first_text(&document, &selectors.author_title),
        labels: multi_text(&document, &selectors.labels),
        year_released,
        pull_quote: first_text(&document, &selectors.pull_quote),
        word_count: word_count(&review_body),
        review_body,
        is_best_new_music: exists(&document, &selectors.is_best_new_music),
        is_collection: exists(&document, &selectors.is_collection),
    })
}

pub fn sanitize_text(text: &str) -> String {
    text.replace(',', COMMA_TOKEN)
}

pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Tokens between single spaces. An empty body still counts as one token.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

fn text_of(element: ElementRef<'_>) -> String {
    sanitize_text(&element.text().collect::<String>())
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(text_of)
}

fn first_datetime(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| sanitize_text(element.value().attr("datetime").unwrap_or("")))
}

fn multi_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .map(text_of)
        .collect::<Vec<_>>()
        .join(MULTI_VALUE_SEPARATOR)
}

fn exists(document: &Html, selector: &Selector) -> bool {
    document.select(selector).next().is_some()
}
