// src/models/mod.rs

//! Domain models for the deck-scout service.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod deck;
mod graphql;
mod selectors;

// Re-export all public types
pub use config::{
    Config, CorsConfig, ENV_CORS_HOSTS, ENV_HTTP_HOST, ENV_HTTP_PORT, ENV_RANGERS_PROXY,
    FetcherConfig, ProxyConfig, ServerConfig,
};
pub use deck::{DeckRecord, SearchResult};
pub use graphql::{DeckVariables, GET_DECK_OPERATION, GET_DECK_QUERY, RangersQuery};
pub use selectors::ListingSelectors;
