// src/server/mod.rs

//! HTTP front door: routes, CORS, request logging and panic recovery.

mod cors;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::Result;
use crate::models::Config;
use crate::services::{DeckSearch, RangersProxy};
use crate::utils::http::create_client;

pub use cors::OriginMatcher;
pub use handlers::{DeckParams, PingResponse, SearchParams};

/// Shared, read-only state of the running service.
pub struct AppState {
    pub config: Config,
    pub search: DeckSearch,
    /// Present when the proxy route is enabled
    pub rangers: Option<RangersProxy>,
    pub origins: OriginMatcher,
}

impl AppState {
    /// Build every service from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let search = DeckSearch::new(&config)?;

        let rangers = if config.proxy.enabled {
            let client = create_client(&config.fetcher)?;
            Some(RangersProxy::new(client, config.proxy.endpoint.clone()))
        } else {
            None
        };

        let origins = OriginMatcher::new(&config.cors.allowed_origins)?;

        Ok(Self {
            config,
            search,
            rangers,
            origins,
        })
    }
}

/// Build the application router.
pub fn create_app(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::search))
        .route("/ping", get(handlers::ping));

    if state.rangers.is_some() {
        router = router.route("/rangersproxy", get(handlers::rangers_proxy));
    }

    router
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn(handlers::log_requests))
        .layer(state.origins.layer())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::from_config(config)?);

    if let Some(proxy) = &state.rangers {
        log::info!("Rangers proxy enabled, upstream {}", proxy.endpoint());
    }
    log::info!(
        "Fetching allowed from {}",
        state.config.fetcher.allowed_domains.join(", ")
    );

    let app = create_app(state);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
