// src/services/fetcher.rs

//! Single-page fetcher.
//!
//! Requests one URL from an allowed domain, parses the HTML and hands every
//! element matching the registered listing selectors to a [`VisitHandler`].

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;
use crate::utils::DomainAllowList;
use crate::utils::http::{create_restricted_client, is_html, is_success};

/// Receives the events of one visit.
///
/// Exactly one of [`on_response`](Self::on_response) or
/// [`on_error`](Self::on_error) is called for a visit that reaches the
/// network. `on_html` calls follow `on_response`.
pub trait VisitHandler {
    /// Called for each element matching a listing selector.
    fn on_html(&mut self, element: ElementRef<'_>);

    /// Called once the page was loaded with an accepted status.
    fn on_response(&mut self, status: u16);

    /// Called when the request failed or was answered with an error status.
    /// `status` is 0 when no response was received.
    fn on_error(&mut self, status: u16, error: &AppError);
}

/// Fetches pages from a fixed set of domains.
pub struct PageFetcher {
    client: Client,
    allowed: DomainAllowList,
    listing: Vec<Selector>,
}

impl PageFetcher {
    /// Create a fetcher that dispatches elements matching `listing`, in order.
    pub fn new(config: &FetcherConfig, listing: Vec<Selector>) -> Result<Self> {
        let allowed = DomainAllowList::new(&config.allowed_domains);
        let client = create_restricted_client(config, allowed.clone())?;

        Ok(Self {
            client,
            allowed,
            listing,
        })
    }

    /// Visit `url`, reporting what happens to `handler`.
    ///
    /// Returns an error without touching `handler` when the URL does not
    /// parse or its host is not allowed. Failures after the request was sent
    /// are reported through [`VisitHandler::on_error`] instead.
    pub async fn visit<H>(&self, url: &str, handler: &mut H) -> Result<()>
    where
        H: VisitHandler + Send,
    {
        let target = self.allowed.check(url)?;

        let response = match self.client.get(target.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = AppError::from(e);
                handler.on_error(error.status_code(), &error);
                return Ok(());
            }
        };

        let status = response.status().as_u16();
        if !is_success(status) {
            let error = AppError::Status {
                url: target.to_string(),
                status,
            };
            handler.on_error(status, &error);
            return Ok(());
        }

        let html = is_html(response.headers());
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                handler.on_error(status, &AppError::from(e));
                return Ok(());
            }
        };

        handler.on_response(status);
        if html {
            self.dispatch(&body, handler);
        } else {
            log::debug!("Skipping non-HTML body from {}", target);
        }

        Ok(())
    }

    /// Run every listing selector over the page, in registration order.
    fn dispatch<H: VisitHandler>(&self, body: &str, handler: &mut H) {
        let document = Html::parse_document(body);
        for selector in &self.listing {
            for element in document.select(selector) {
                handler.on_html(element);
            }
        }
    }
}
