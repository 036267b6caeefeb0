// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};

use crate::error::Result;
use crate::models::FetcherConfig;
use crate::utils::url::DomainAllowList;

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

fn client_builder(config: &FetcherConfig) -> ClientBuilder {
    let builder = Client::builder().user_agent(&config.user_agent);
    match config.timeout_secs {
        Some(secs) => builder.timeout(Duration::from_secs(secs)),
        None => builder,
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &FetcherConfig) -> Result<Client> {
    Ok(client_builder(config).build()?)
}

/// Create a client whose redirects may only land on allowed hosts.
pub fn create_restricted_client(
    config: &FetcherConfig,
    allowed: DomainAllowList,
) -> Result<Client> {
    let policy = Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if allowed.permits(attempt.url()) {
            attempt.follow()
        } else {
            let host = attempt.url().host_str().unwrap_or_default().to_string();
            attempt.error(format!("redirect to forbidden domain {host}"))
        }
    });

    Ok(client_builder(config).redirect(policy).build()?)
}

/// Whether a fetch status counts as a successfully loaded page.
pub fn is_success(status: u16) -> bool {
    (200..=202).contains(&status)
}

/// Whether the response declares an HTML body.
pub fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_lowercase().contains("html"))
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn test_success_window() {
        assert!(is_success(200));
        assert!(is_success(202));
        assert!(!is_success(203));
        assert!(!is_success(204));
        assert!(!is_success(301));
        assert!(!is_success(404));
        assert!(!is_success(0));
    }

    #[test]
    fn test_is_html() {
        let mut headers = HeaderMap::new();
        assert!(!is_html(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/HTML; charset=utf-8"));
        assert!(is_html(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_html(&headers));
    }

    #[test]
    fn test_clients_build_from_defaults() {
        let config = FetcherConfig::default();
        assert!(create_client(&config).is_ok());
        assert!(create_restricted_client(&config, DomainAllowList::new(["ringsdb.com"])).is_ok());
    }
}
