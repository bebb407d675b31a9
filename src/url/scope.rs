//! Crawl scope policy
//!
//! Decides whether a discovered URL is eligible for the frontier. Two
//! policies exist in the wild for audience-focused crawls: stay on the start
//! URL's host, or stay under the start URL's path prefix. Both are legitimate,
//! so the active mode is a configuration choice rather than a constant.

use crate::UrlError;
use serde::Deserialize;
use url::Url;

/// Which constraint candidate URLs must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeMode {
    /// Any path on the start URL's host
    Host,

    /// Same host, and a path under the start URL's directory
    PathPrefix,
}

/// Frontier eligibility check derived from the start URL
///
/// Host comparison is exact: no subdomain matching, so `blog.example.com`
/// is out of scope for a crawl started on `example.com`.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    host: String,
    port: Option<u16>,
    path_prefix: String,
    mode: ScopeMode,
}

impl CrawlScope {
    /// Derives the scope from a (normalized) start URL
    pub fn new(start_url: &Url, mode: ScopeMode) -> Result<Self, UrlError> {
        let host = start_url
            .host_str()
            .ok_or(UrlError::MissingHost)?
            .to_string();

        Ok(Self {
            host,
            port: start_url.port_or_known_default(),
            path_prefix: path_prefix_of(start_url.path()),
            mode,
        })
    }

    /// Checks whether a parsed URL is eligible for the frontier
    pub fn contains(&self, candidate: &Url) -> bool {
        match candidate.host_str() {
            Some(host) if host == self.host => {}
            _ => return false,
        }
        if candidate.port_or_known_default() != self.port {
            return false;
        }

        match self.mode {
            ScopeMode::Host => true,
            ScopeMode::PathPrefix => path_in_prefix(candidate.path(), &self.path_prefix),
        }
    }

    /// String-level convenience: malformed URLs are out of scope, never an error
    pub fn is_in_scope(&self, candidate: &str) -> bool {
        match Url::parse(candidate) {
            Ok(url) => self.contains(&url),
            Err(_) => false,
        }
    }

    /// The host every in-scope URL must match exactly
    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Reduces a start path to the prefix candidates must live under
///
/// A trailing file segment (`/admissions/index.html`) scopes to its
/// directory; a directory path scopes to itself; the root scopes to the
/// whole host.
fn path_prefix_of(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }

    match trimmed.rsplit_once('/') {
        Some((dir, last)) if last.contains('.') => dir.to_string(),
        _ => trimmed.to_string(),
    }
}

/// Segment-aware prefix check: `/admissions` covers `/admissions/apply`
/// but not `/admissionsfoo`
fn path_in_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }

    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(start: &str, mode: ScopeMode) -> CrawlScope {
        let url = Url::parse(start).unwrap();
        CrawlScope::new(&url, mode).unwrap()
    }

    #[test]
    fn test_same_host_in_scope() {
        let s = scope("https://example.com/", ScopeMode::Host);
        assert!(s.is_in_scope("https://example.com/anywhere/at/all"));
    }

    #[test]
    fn test_different_host_out_of_scope() {
        let s = scope("https://example.com/", ScopeMode::Host);
        assert!(!s.is_in_scope("https://other.com/"));
    }

    #[test]
    fn test_subdomain_is_not_same_host() {
        let s = scope("https://example.com/", ScopeMode::Host);
        assert!(!s.is_in_scope("https://blog.example.com/post"));
        assert!(!s.is_in_scope("https://www.example.com/"));
    }

    #[test]
    fn test_path_prefix_constrains() {
        let s = scope("https://example.com/admissions/", ScopeMode::PathPrefix);
        assert!(s.is_in_scope("https://example.com/admissions/apply"));
        assert!(s.is_in_scope("https://example.com/admissions/faq/costs"));
        assert!(s.is_in_scope("https://example.com/admissions"));
        assert!(!s.is_in_scope("https://example.com/athletics/"));
        assert!(!s.is_in_scope("https://example.com/"));
        assert!(!s.is_in_scope("https://example.com/admissionsfoo"));
    }

    #[test]
    fn test_path_prefix_uses_directory_of_file_urls() {
        let s = scope(
            "https://example.com/admissions/index.html",
            ScopeMode::PathPrefix,
        );
        assert!(s.is_in_scope("https://example.com/admissions/apply"));
        assert!(!s.is_in_scope("https://example.com/research/"));
    }

    #[test]
    fn test_root_start_scopes_whole_host() {
        let s = scope("https://example.com/", ScopeMode::PathPrefix);
        assert!(s.is_in_scope("https://example.com/any/page"));
        assert!(!s.is_in_scope("https://other.com/any/page"));
    }

    #[test]
    fn test_different_port_out_of_scope() {
        let s = scope("http://127.0.0.1:8080/", ScopeMode::Host);
        assert!(s.is_in_scope("http://127.0.0.1:8080/page"));
        assert!(!s.is_in_scope("http://127.0.0.1:9090/page"));
    }

    #[test]
    fn test_default_port_matches_implicit() {
        let s = scope("https://example.com/", ScopeMode::Host);
        assert!(s.is_in_scope("https://example.com:443/page"));
    }

    #[test]
    fn test_host_mode_ignores_path() {
        let s = scope("https://example.com/admissions/", ScopeMode::Host);
        assert!(s.is_in_scope("https://example.com/athletics/"));
    }

    #[test]
    fn test_malformed_url_is_out_of_scope() {
        let s = scope("https://example.com/", ScopeMode::Host);
        assert!(!s.is_in_scope("::::not-a-url"));
        assert!(!s.is_in_scope(""));
    }

    #[test]
    fn test_path_prefix_of() {
        assert_eq!(path_prefix_of("/admissions/apply.html"), "/admissions");
        assert_eq!(path_prefix_of("/admissions/"), "/admissions");
        assert_eq!(path_prefix_of("/admissions"), "/admissions");
        assert_eq!(path_prefix_of("/"), "");
        assert_eq!(path_prefix_of(""), "");
    }
}
