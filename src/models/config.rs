//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ListingSelectors;

/// Environment variable holding `;`-separated CORS origin patterns.
pub const ENV_CORS_HOSTS: &str = "CORS_HOSTS";
/// Environment variable holding the listen port.
pub const ENV_HTTP_PORT: &str = "HTTP_PORT";
/// Environment variable holding the listen address.
pub const ENV_HTTP_HOST: &str = "HTTP_HOST";
/// Environment variable toggling the rangers proxy route.
pub const ENV_RANGERS_PROXY: &str = "RANGERS_PROXY";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Listen address settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Browser origins allowed by the CORS layer
    #[serde(default)]
    pub cors: CorsConfig,

    /// Outbound page fetching settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// CSS selectors used to find and read deck listings
    #[serde(default)]
    pub selectors: ListingSelectors,

    /// GraphQL proxy settings
    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using the given variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(hosts) = lookup(ENV_CORS_HOSTS) {
            self.cors.allowed_origins = hosts.split(';').map(str::to_string).collect();
        }

        if let Some(port) = lookup(ENV_HTTP_PORT).filter(|p| !p.is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| AppError::config(format!("{ENV_HTTP_PORT}={port:?}: {e}")))?;
        }

        if let Some(host) = lookup(ENV_HTTP_HOST).filter(|h| !h.is_empty()) {
            self.server.host = host;
        }

        if let Some(flag) = lookup(ENV_RANGERS_PROXY) {
            self.proxy.enabled = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(AppError::config(format!(
                        "{ENV_RANGERS_PROXY} must be a boolean, got {other:?}"
                    )));
                }
            };
        }

        Ok(())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::validation("server.host is empty"));
        }
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == Some(0) {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.allowed_domains.is_empty() {
            return Err(AppError::validation("No allowed domains defined"));
        }
        if self.selectors.listing.is_empty() {
            return Err(AppError::validation("No listing selectors defined"));
        }
        if self.proxy.enabled {
            url::Url::parse(&self.proxy.endpoint)?;
        }
        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Listen address settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
        }
    }
}

/// CORS settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origin patterns; `*` matches any run of characters
    #[serde(default = "defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::allowed_origins(),
        }
    }
}

/// Outbound HTTP settings for page fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset waits for the remote end
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Hostnames the fetcher may request
    #[serde(default = "defaults::allowed_domains")]
    pub allowed_domains: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            allowed_domains: defaults::allowed_domains(),
        }
    }
}

/// GraphQL proxy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Whether `/rangersproxy` is served
    #[serde(default = "defaults::proxy_enabled")]
    pub enabled: bool,

    /// Upstream GraphQL endpoint
    #[serde(default = "defaults::proxy_endpoint")]
    pub endpoint: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::proxy_enabled(),
            endpoint: defaults::proxy_endpoint(),
        }
    }
}

mod defaults {
    // Server defaults
    pub fn host() -> String {
        "0.0.0.0".into()
    }
    pub fn port() -> u16 {
        8281
    }

    // CORS defaults
    pub fn allowed_origins() -> Vec<String> {
        vec![
            "*.middle-earth.house".to_string(),
            "https://card-table.app".to_string(),
        ]
    }

    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; deck-scout/0.1)".into()
    }
    pub fn allowed_domains() -> Vec<String> {
        vec!["marvelcdb.com".to_string(), "ringsdb.com".to_string()]
    }

    // Proxy defaults
    pub fn proxy_enabled() -> bool {
        true
    }
    pub fn proxy_endpoint() -> String {
        "https://gapi.rangersdb.com/v1/graphql".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn defaults_match_public_service() {
        let config = Config::default();
        assert_eq!(config.server.port, 8281);
        assert_eq!(config.bind_addr(), "0.0.0.0:8281");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["*.middle-earth.house", "https://card-table.app"]
        );
        assert_eq!(config.fetcher.allowed_domains, vec!["marvelcdb.com", "ringsdb.com"]);
        assert!(config.proxy.enabled);
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetcher.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_proxy_endpoint_only_when_enabled() {
        let mut config = Config::default();
        config.proxy.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
        config.proxy.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_cors_and_port() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[
                (ENV_CORS_HOSTS, "https://a.example;https://b.example"),
                (ENV_HTTP_PORT, "9000"),
                (ENV_HTTP_HOST, "127.0.0.1"),
            ]))
            .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn empty_port_keeps_default() {
        let mut config = Config::default();
        config.apply_env_from(env(&[(ENV_HTTP_PORT, "")])).unwrap();
        assert_eq!(config.server.port, 8281);
    }

    #[test]
    fn invalid_port_is_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env_from(env(&[(ENV_HTTP_PORT, "eighty")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn proxy_toggle_from_env() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[(ENV_RANGERS_PROXY, "off")]))
            .unwrap();
        assert!(!config.proxy.enabled);
        assert!(
            config
                .apply_env_from(env(&[(ENV_RANGERS_PROXY, "maybe")]))
                .is_err()
        );
    }

    #[test]
    fn load_partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9999\n\n[fetcher]\nallowed_domains = [\"127.0.0.1\"]\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.fetcher.allowed_domains, vec!["127.0.0.1"]);
        assert_eq!(config.selectors.listing.len(), 2);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.server.port, 8281);
    }
}
