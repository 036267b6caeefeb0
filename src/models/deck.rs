//! Deck listing data structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A deck listing scraped from a search page.
///
/// The deck id is not part of the serialized record; it keys the record in
/// [`SearchResult::decks`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRecord {
    #[serde(skip)]
    pub id: String,

    /// Deck display name, as printed in the link
    pub name: String,

    /// Hero name, empty when the listing has none
    #[serde(default)]
    pub hero: String,

    /// Author handle, empty when the listing has none
    #[serde(default)]
    pub by: String,

    #[serde(default)]
    pub likes: u32,
}

impl DeckRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hero: String::new(),
            by: String::new(),
            likes: 0,
        }
    }
}

/// Everything scraped from one visited page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Status of the page fetch; 0 when no response was observed
    pub status_code: u16,

    pub decks: HashMap<String, DeckRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let mut result = SearchResult {
            status_code: 200,
            ..SearchResult::default()
        };
        let mut deck = DeckRecord::new("123", "Aragorn's Hope");
        deck.hero = "Aragorn".to_string();
        deck.likes = 7;
        result.decks.insert(deck.id.clone(), deck);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "statusCode": 200,
                "decks": {
                    "123": { "name": "Aragorn's Hope", "hero": "Aragorn", "by": "", "likes": 7 }
                }
            })
        );
    }

    #[test]
    fn test_empty_result() {
        let value = serde_json::to_value(SearchResult::default()).unwrap();
        assert_eq!(value, serde_json::json!({ "statusCode": 0, "decks": {} }));
    }
}
