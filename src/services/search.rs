// src/services/search.rs

//! Deck search over a single listing page.

use scraper::ElementRef;

use crate::error::{AppError, Result};
use crate::models::{Config, DeckRecord, SearchResult};
use crate::services::extractor::DeckExtractor;
use crate::services::fetcher::{PageFetcher, VisitHandler};

/// Collects the outcome of one page visit into a [`SearchResult`].
///
/// Owned by a single request; nothing is shared between searches.
pub struct SearchAggregator<'a> {
    extractor: &'a DeckExtractor,
    result: SearchResult,
    status_recorded: bool,
}

impl<'a> SearchAggregator<'a> {
    pub fn new(extractor: &'a DeckExtractor) -> Self {
        Self {
            extractor,
            result: SearchResult::default(),
            status_recorded: false,
        }
    }

    /// Store a deck, replacing any earlier deck with the same id.
    pub fn insert(&mut self, deck: DeckRecord) {
        if let Some(previous) = self.result.decks.insert(deck.id.clone(), deck) {
            log::debug!("Deck {} listed more than once, keeping last", previous.id);
        }
    }

    /// Record the fetch status. Only the first call takes effect.
    pub fn record_status(&mut self, status: u16) {
        if self.status_recorded {
            log::debug!(
                "Ignoring status {} after {} was recorded",
                status,
                self.result.status_code
            );
            return;
        }
        self.result.status_code = status;
        self.status_recorded = true;
    }

    pub fn finish(self) -> SearchResult {
        self.result
    }
}

impl VisitHandler for SearchAggregator<'_> {
    fn on_html(&mut self, element: ElementRef<'_>) {
        if let Some(deck) = self.extractor.extract(element) {
            self.insert(deck);
        }
    }

    fn on_response(&mut self, status: u16) {
        log::info!("Response received, status: {}", status);
        self.record_status(status);
    }

    fn on_error(&mut self, status: u16, error: &AppError) {
        log::warn!("Error received, status: {}, error: {}", status, error);
        self.record_status(status);
    }
}

/// Scrapes deck listings from allowed community sites.
pub struct DeckSearch {
    fetcher: PageFetcher,
    extractor: DeckExtractor,
}

impl DeckSearch {
    pub fn new(config: &Config) -> Result<Self> {
        let extractor = DeckExtractor::new(&config.selectors)?;
        let fetcher = PageFetcher::new(&config.fetcher, extractor.listing_selectors().to_vec())?;
        Ok(Self { fetcher, extractor })
    }

    /// Visit `uri` and collect every deck listed on the page.
    ///
    /// Never fails: fetch problems are reflected in `status_code` and an
    /// empty or partial deck map.
    pub async fn search(&self, uri: &str) -> SearchResult {
        log::info!("Visiting uri: {}", uri);

        let mut aggregator = SearchAggregator::new(&self.extractor);
        if let Err(e) = self.fetcher.visit(uri, &mut aggregator).await {
            log::warn!("Visit of {:?} rejected: {}", uri, e);
        }

        let result = aggregator.finish();
        log::info!(
            "Search finished with status {} and {} decks",
            result.status_code,
            result.decks.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::models::ListingSelectors;
    use crate::services::extractor::parse_selector;

    fn extractor() -> DeckExtractor {
        DeckExtractor::new(&ListingSelectors::default()).unwrap()
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let html = r#"<div class="decklists">
            <div class="box"><a href="/decklist/view/10/a">First Name</a><span class="num">1</span></div>
            <div class="box"><a href="/decklist/view/11/b">Other</a></div>
            <div class="box"><a href="/decklist/view/10/a">Second Name</a><span class="num">2</span></div>
        </div>"#;
        let document = Html::parse_fragment(html);
        let selector = parse_selector(".decklists > .box").unwrap();
        let extractor = extractor();

        let mut aggregator = SearchAggregator::new(&extractor);
        for element in document.select(&selector) {
            aggregator.on_html(element);
        }
        let result = aggregator.finish();

        assert_eq!(result.decks.len(), 2);
        let deck = &result.decks["10"];
        assert_eq!(deck.name, "Second Name");
        assert_eq!(deck.likes, 2);
    }

    #[test]
    fn test_skipped_elements_never_inserted() {
        let html = r#"<div class="decklists">
            <div class="box"><a href="/decklist/view//a">No id</a></div>
            <div class="box"><a href="/decklist/view/4/a"></a></div>
            <div class="box"><span class="num">5</span></div>
        </div>"#;
        let document = Html::parse_fragment(html);
        let selector = parse_selector(".decklists > .box").unwrap();
        let extractor = extractor();

        let mut aggregator = SearchAggregator::new(&extractor);
        for element in document.select(&selector) {
            aggregator.on_html(element);
        }

        assert!(aggregator.finish().decks.is_empty());
    }

    #[test]
    fn test_first_status_wins() {
        let extractor = extractor();
        let mut aggregator = SearchAggregator::new(&extractor);

        aggregator.on_response(200);
        aggregator.on_error(500, &AppError::validation("late"));

        assert_eq!(aggregator.finish().status_code, 200);
    }

    #[test]
    fn test_error_status_recorded() {
        let extractor = extractor();
        let mut aggregator = SearchAggregator::new(&extractor);

        aggregator.on_error(404, &AppError::validation("not found"));

        let result = aggregator.finish();
        assert_eq!(result.status_code, 404);
        assert!(result.decks.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_uri_yields_empty_result() {
        let search = DeckSearch::new(&Config::default()).unwrap();

        let result = search.search("https://example.com/decklists").await;
        assert_eq!(result, SearchResult::default());

        let result = search.search("").await;
        assert_eq!(result.status_code, 0);
        assert!(result.decks.is_empty());
    }
}
