// src/server/handlers.rs

//! Route handlers and error responses.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::services::RangersProxy;

use super::AppState;

/// Query parameters of `GET /`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub uri: String,
}

/// Query parameters of `GET /rangersproxy`.
#[derive(Debug, Deserialize)]
pub struct DeckParams {
    #[serde(rename = "deckId")]
    pub deck_id: Option<String>,
}

/// Body of `GET /ping`.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    #[serde(rename = "Status")]
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidParam { .. } => StatusCode::BAD_REQUEST,
            AppError::Http(_) | AppError::Json(_) | AppError::Status { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.is_client_error() {
            log::warn!("Rejected request: {}", self);
        } else {
            log::error!("Request failed: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /` scrapes the page named by `uri`.
///
/// Scrape failures still answer 200; the caller inspects `statusCode`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let result = state.search.search(&params.uri).await;

    if log::log_enabled!(log::Level::Debug)
        && let Ok(pretty) = serde_json::to_string_pretty(&result)
    {
        log::debug!("Search result:\n{}", pretty);
    }

    match serde_json::to_vec(&result) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to serialize search result: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /rangersproxy` relays the upstream answer for `deckId`.
pub async fn rangers_proxy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeckParams>,
) -> Result<Json<Value>, AppError> {
    let deck_id = RangersProxy::parse_deck_id(params.deck_id.as_deref())?;

    let proxy = state
        .rangers
        .as_ref()
        .ok_or_else(|| AppError::config("rangers proxy is disabled"))?;

    let data = proxy.fetch_deck(deck_id).await?;
    Ok(Json(data.map_or(Value::Null, Value::Object)))
}

/// `GET /ping` health check.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { status: "OK" })
}

/// Log method, path, status and latency of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} -> {} ({:?})",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
