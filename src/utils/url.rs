// src/utils/url.rs

//! URL checks for outbound requests.

use url::Url;

use crate::error::{AppError, Result};

/// Hostnames a fetcher is permitted to request.
///
/// Matching is exact on the lowercased host, without port.
#[derive(Debug, Clone, Default)]
pub struct DomainAllowList {
    domains: Vec<String>,
}

impl DomainAllowList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Whether the URL's host is on the list.
    pub fn permits(&self, url: &Url) -> bool {
        url.host_str()
            .map(|host| host.to_lowercase())
            .is_some_and(|host| self.domains.iter().any(|d| *d == host))
    }

    /// Parse `raw` and ensure it points at an allowed host.
    pub fn check(&self, raw: &str) -> Result<Url> {
        let url = Url::parse(raw)?;
        if self.permits(&url) {
            Ok(url)
        } else {
            Err(AppError::ForbiddenDomain(
                url.host_str().unwrap_or_default().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> DomainAllowList {
        DomainAllowList::new(["marvelcdb.com", "RingsDB.com"])
    }

    #[test]
    fn test_permits_listed_hosts() {
        let list = allow_list();
        assert!(list.check("https://marvelcdb.com/decklists").is_ok());
        assert!(list.check("https://ringsdb.com/decklists/find?sort=likes").is_ok());
        assert!(list.check("http://RINGSDB.COM:8080/x").is_ok());
    }

    #[test]
    fn test_rejects_other_hosts() {
        let list = allow_list();
        assert!(matches!(
            list.check("https://www.ringsdb.com/"),
            Err(AppError::ForbiddenDomain(host)) if host == "www.ringsdb.com"
        ));
        assert!(list.check("https://evil.example/ringsdb.com").is_err());
    }

    #[test]
    fn test_rejects_unparsable_url() {
        assert!(matches!(allow_list().check(""), Err(AppError::Url(_))));
        assert!(matches!(
            allow_list().check("ringsdb.com/decklists"),
            Err(AppError::Url(_))
        ));
    }

    #[test]
    fn test_empty_entries_are_dropped() {
        let list = DomainAllowList::new(["", "  "]);
        assert!(list.check("https://ringsdb.com/").is_err());
    }
}
