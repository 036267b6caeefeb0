// src/server/cors.rs

//! CORS policy built from configured origin patterns.

use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{AppError, Result};

/// Matches request origins against patterns where `*` stands for any run of
/// characters, e.g. `*.middle-earth.house`.
#[derive(Debug, Clone)]
pub struct OriginMatcher {
    patterns: Vec<Regex>,
}

impl OriginMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(compile_pattern)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn matches(&self, origin: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(origin))
    }

    /// Build the CORS layer for this set of origins.
    pub fn layer(&self) -> CorsLayer {
        let matcher = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _parts: &Parts| {
                    origin.to_str().is_ok_and(|o| matcher.matches(o))
                },
            ))
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
            ])
            .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT])
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|e| AppError::origin_pattern(pattern, e))
}
