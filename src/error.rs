// src/error.rs

//! Unified error handling for the deck-scout service.

use std::fmt;

use thiserror::Error;

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// CORS origin pattern could not be compiled
    #[error("Invalid origin pattern '{pattern}': {message}")]
    OriginPattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller supplied a malformed parameter
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParam { name: String, message: String },

    /// Target host is not on the fetch allow-list
    #[error("Forbidden domain: {0}")]
    ForbiddenDomain(String),

    /// Upstream answered outside the accepted status range
    #[error("Upstream responded with status {status} for {url}")]
    Status { url: String, status: u16 },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create an origin pattern error.
    pub fn origin_pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::OriginPattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::InvalidParam {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// HTTP status observed with this error, or 0 when no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Http(e) => e.status().map_or(0, |s| s.as_u16()),
            _ => 0,
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParam { .. })
    }
}
