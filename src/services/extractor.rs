// src/services/extractor.rs

//! Deck listing extraction.
//!
//! Reads one listing element (a table row or a decklist box) into a
//! [`DeckRecord`]. The same extraction serves every supported page layout;
//! only the listing selector differs.

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};
use crate::models::{DeckRecord, ListingSelectors};

/// Path used when the deck link has no `href`, so segment lookup yields an empty id.
const MISSING_HREF: &str = "nothing/to/see//";

/// Compiled selectors for reading deck listings.
#[derive(Debug, Clone)]
pub struct DeckExtractor {
    listing: Vec<Selector>,
    deck_link: Selector,
    id_segment: usize,
    hero: Selector,
    author: Selector,
    likes: Selector,
}

impl DeckExtractor {
    /// Compile the configured selectors.
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        let listing = selectors
            .listing
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            listing,
            deck_link: parse_selector(&selectors.deck_link)?,
            id_segment: selectors.id_segment,
            hero: parse_selector(&selectors.hero)?,
            author: parse_selector(&selectors.author)?,
            likes: parse_selector(&selectors.likes)?,
        })
    }

    /// Selectors for listing elements, in the order they are applied.
    pub fn listing_selectors(&self) -> &[Selector] {
        &self.listing
    }

    /// Extract a deck record from one listing element.
    ///
    /// Returns `None` when the element has no deck link, the link text is
    /// empty, or no id can be read from the link.
    pub fn extract(&self, listing: ElementRef<'_>) -> Option<DeckRecord> {
        let link = listing.select(&self.deck_link).next()?;

        let name = text_of(link);
        if name.is_empty() {
            return None;
        }

        let href = link.value().attr("href").unwrap_or(MISSING_HREF);
        let id = href.split('/').nth(self.id_segment).unwrap_or("");
        if id.is_empty() {
            return None;
        }

        let mut deck = DeckRecord::new(id, name);

        if let Some(hero) = first_text(listing, &self.hero) {
            deck.hero = hero;
        }

        if let Some(by) = first_text(listing, &self.author) {
            deck.by = by;
        }

        if let Some(likes) = first_text(listing, &self.likes) {
            match likes.parse() {
                Ok(n) => deck.likes = n,
                Err(e) => log::debug!("Ignoring like count {:?} for deck {}: {}", likes, deck.id, e),
            }
        }

        Some(deck)
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the first descendant matching `selector`, if any and non-empty.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(text_of)
        .filter(|text| !text.is_empty())
}
