// src/models/selectors.rs

//! CSS selectors for scraping decklist pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for locating deck listings and reading their fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selectors for listing elements, one per supported page layout
    #[serde(default = "defaults::listing")]
    pub listing: Vec<String>,

    /// Selector for the deck-view link within a listing
    #[serde(default = "defaults::deck_link")]
    pub deck_link: String,

    /// Index of the `/`-separated `href` segment holding the deck id
    #[serde(default = "defaults::id_segment")]
    pub id_segment: usize,

    /// Selector for the hero name within a listing
    #[serde(default = "defaults::hero")]
    pub hero: String,

    /// Selector for the author's profile link within a listing
    #[serde(default = "defaults::author")]
    pub author: String,

    /// Selector for the like counter within a listing
    #[serde(default = "defaults::likes")]
    pub likes: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            listing: defaults::listing(),
            deck_link: defaults::deck_link(),
            id_segment: defaults::id_segment(),
            hero: defaults::hero(),
            author: defaults::author(),
            likes: defaults::likes(),
        }
    }
}

mod defaults {
    pub fn listing() -> Vec<String> {
        vec![
            // Legacy table layout
            ".table > tbody > tr".to_string(),
            // Card box layout
            ".decklists > .box".to_string(),
        ]
    }
    pub fn deck_link() -> String {
        r#"a[href^="/decklist/view/"]"#.to_string()
    }
    pub fn id_segment() -> usize {
        3
    }
    pub fn hero() -> String {
        ".fg-hero".to_string()
    }
    pub fn author() -> String {
        r#"a[href^="/user/profile/"]"#.to_string()
    }
    pub fn likes() -> String {
        ".num".to_string()
    }
}
