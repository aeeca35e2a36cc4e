use crate::client::Fetcher;
use crate::error::{Result, ScanError};
use crate::result::PageOutcome;
use crate::selectors::{REVIEW_LINK_SELECTOR, parse_selector};
use futures::Stream;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

const EXHAUSTED_STATUS: u16 = 404;

/// Walks a paginated listing one page index at a time.
///
/// The pager is lazy and cannot be restarted: once it yields
/// [`PageOutcome::Exhausted`], or the caller calls [`ListingPager::finish`],
/// every further call to [`ListingPager::next_page`] returns `None`.
pub struct ListingPager {
    fetcher: Fetcher,
    listing_url: Url,
    page_param: String,
    link_selector: Selector,
    next_index: u32,
    finished: bool,
}

impl ListingPager {
    pub fn new(fetcher: Fetcher, listing_url: &str, page_param: &str) -> Result<Self> {
        let listing_url = Url::parse(listing_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", listing_url, e)))?;

        Ok(Self {
            fetcher,
            listing_url,
            page_param: page_param.to_string(),
            link_selector: parse_selector("reviewLink", REVIEW_LINK_SELECTOR)?,
            next_index: 1,
            finished: false,
        })
    }

    pub fn with_link_selector(mut self, selector: &str) -> Result<Self> {
        self.link_selector = parse_selector("reviewLink", selector)?;
        Ok(self)
    }

    pub fn with_start_page(mut self, index: u32) -> Self {
        self.next_index = index;
        self
    }

    pub fn page_url(&self, index: u32) -> Url {
        let mut url = self.listing_url.clone();
        url.query_pairs_mut()
            .append_pair(&self.page_param, &index.to_string());
        url
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop the pager early; used when the caller gives up on a transport error.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Schedule the most recently yielded index to be fetched again.
    pub fn rewind(&mut self) {
        if !self.finished && self.next_index > 1 {
            self.next_index -= 1;
        }
    }

    pub async fn next_page(&mut self) -> Option<PageOutcome> {
        if self.finished {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;
        let page_url = self.page_url(index);
        info!("On page {}", index);

        let page = match self.fetcher.get(page_url.as_str()).await {
            Ok(page) => page,
            Err(error) => return Some(PageOutcome::TransportError { index, error }),
        };

        if page.status_code == EXHAUSTED_STATUS {
            self.finished = true;
            return Some(PageOutcome::Exhausted { index });
        }

        if !page.is_success() {
            return Some(PageOutcome::TransportError {
                index,
                error: ScanError::Status {
                    url: page_url.to_string(),
                    status: page.status_code,
                },
            });
        }

        let body = page.body.unwrap_or_default();
        let urls = extract_review_links(&body, &page_url, &self.link_selector);
        debug!("Page {} listed {} reviews", index, urls.len());

        Some(PageOutcome::Page {
            index,
            status_code: page.status_code,
            urls,
        })
    }

    pub fn into_stream(self) -> impl Stream<Item = PageOutcome> {
        futures::stream::unfold(self, |mut pager| async move {
            pager.next_page().await.map(|outcome| (outcome, pager))
        })
    }
}

/// Collect every matching anchor's target, resolved against the page it was found on.
pub fn extract_review_links(html: &str, page_url: &Url, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| match page_url.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("Skipping unresolvable link {}: {}", href, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn listing_html(links: &[&str]) -> String {
        let mut html = String::from("<html><body><div class=\"reviews\">");
        for link in links {
            html.push_str(&format!(
                r#"<div class="review"><a href="{}">Review</a></div>"#,
                link
            ));
        }
        html.push_str("<a href=\"/not-a-review/\">Other</a></div></body></html>");
        html
    }

    async fn mount_page(server: &MockServer, page: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/reviews/albums/"))
            .and(query_param("page", page))
            .respond_with(template)
            .expect(1)
            .mount(server)
            .await;
    }

    fn pager_for(server: &MockServer) -> ListingPager {
        ListingPager::new(
            Fetcher::new().unwrap(),
            &format!("{}/reviews/albums/", server.uri()),
            "page",
        )
        .unwrap()
    }

    #[test]
    fn test_extract_review_links_resolves_relative_hrefs() {
        let html = listing_html(&["/reviews/albums/one/", "https://other.example/two/"]);
        let base = Url::parse("https://pitchfork.com/reviews/albums/?page=1").unwrap();
        let selector = parse_selector("reviewLink", REVIEW_LINK_SELECTOR).unwrap();

        let links = extract_review_links(&html, &base, &selector);

        assert_eq!(
            links,
            vec![
                "https://pitchfork.com/reviews/albums/one/".to_string(),
                "https://other.example/two/".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_review_links_empty_body() {
        let base = Url::parse("https://pitchfork.com/reviews/albums/?page=1").unwrap();
        let selector = parse_selector("reviewLink", REVIEW_LINK_SELECTOR).unwrap();

        assert!(extract_review_links("", &base, &selector).is_empty());
    }

    #[test]
    fn test_page_url_appends_index() {
        let pager = ListingPager::new(
            Fetcher::new().unwrap(),
            "https://pitchfork.com/reviews/albums/",
            "page",
        )
        .unwrap();

        assert_eq!(
            pager.page_url(7).as_str(),
            "https://pitchfork.com/reviews/albums/?page=7"
        );
    }

    #[tokio::test]
    async fn test_pager_stops_after_404() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "1",
            ResponseTemplate::new(200).set_body_string(listing_html(&["/a/", "/b/", "/c/"])),
        )
        .await;
        mount_page(&server, "2", ResponseTemplate::new(404)).await;

        let mut pager = pager_for(&server);

        match pager.next_page().await {
            Some(PageOutcome::Page { index, urls, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(urls.len(), 3);
                assert!(urls[0].ends_with("/a/"));
            }
            other => panic!("expected a page, got {:?}", other),
        }
        assert!(matches!(
            pager.next_page().await,
            Some(PageOutcome::Exhausted { index: 2 })
        ));
        assert!(pager.is_finished());
        assert!(pager.next_page().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_page_does_not_terminate() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "1",
            ResponseTemplate::new(200).set_body_string(listing_html(&[])),
        )
        .await;
        mount_page(
            &server,
            "2",
            ResponseTemplate::new(200).set_body_string(listing_html(&["/x/"])),
        )
        .await;
        mount_page(&server, "3", ResponseTemplate::new(404)).await;

        let outcomes: Vec<PageOutcome> = pager_for(&server).into_stream().collect().await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].urls().is_empty());
        assert_eq!(outcomes[1].urls().len(), 1);
        assert!(matches!(outcomes[2], PageOutcome::Exhausted { index: 3 }));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let server = MockServer::start().await;
        mount_page(&server, "1", ResponseTemplate::new(503)).await;

        let mut pager = pager_for(&server);

        match pager.next_page().await {
            Some(PageOutcome::TransportError {
                index,
                error: ScanError::Status { status, .. },
            }) => {
                assert_eq!(index, 1);
                assert_eq!(status, 503);
            }
            other => panic!("expected a transport error, got {:?}", other),
        }
        assert!(!pager.is_finished());
    }

    #[tokio::test]
    async fn test_rewind_refetches_same_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reviews/albums/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let mut pager = pager_for(&server);

        let first = pager.next_page().await.unwrap();
        assert_eq!(first.index(), 1);
        pager.rewind();
        let second = pager.next_page().await.unwrap();
        assert_eq!(second.index(), 1);
    }
}
