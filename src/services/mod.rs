//! Service layer for the deck-scout application.
//!
//! This module contains the business logic for:
//! - Listing extraction (`DeckExtractor`)
//! - Page fetching (`PageFetcher`)
//! - Deck search aggregation (`DeckSearch`, `SearchAggregator`)
//! - GraphQL proxying (`RangersProxy`)

pub mod extractor;
pub mod fetcher;
mod rangers;
mod search;

pub use extractor::DeckExtractor;
pub use fetcher::{PageFetcher, VisitHandler};
pub use rangers::RangersProxy;
pub use search::{DeckSearch, SearchAggregator};
