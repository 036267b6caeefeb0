// src/services/rangers.rs

//! GraphQL proxy for the rangers deck database.

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::RangersQuery;

/// Posts the fixed `getDeck` query upstream and hands back the raw answer.
pub struct RangersProxy {
    client: Client,
    endpoint: String,
}

impl RangersProxy {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parse the caller's `deckId` parameter.
    pub fn parse_deck_id(raw: Option<&str>) -> Result<i64> {
        let raw = raw.unwrap_or_default();
        raw.parse()
            .map_err(|e| AppError::invalid_param("deckId", format!("{raw:?}: {e}")))
    }

    /// Look up one deck.
    ///
    /// Returns `Ok(None)` when upstream answers with anything but 200; the
    /// body is not read in that case.
    pub async fn fetch_deck(&self, deck_id: i64) -> Result<Option<Map<String, Value>>> {
        let query = RangersQuery::get_deck(deck_id);
        let response = self.client.post(&self.endpoint).json(&query).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("GraphQL endpoint answered {} for deck {}", status, deck_id);
            return Ok(None);
        }

        let body = response.bytes().await?;
        let data: Map<String, Value> = serde_json::from_slice(&body).inspect_err(|e| {
            log::error!("Failed to decode GraphQL response for deck {}: {}", deck_id, e);
        })?;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("GraphQL response for deck {}: {}", deck_id, Value::Object(data.clone()));
        }

        Ok(Some(data))
    }
}
