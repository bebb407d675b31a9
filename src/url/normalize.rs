use crate::UrlError;
use url::Url;

/// Normalizes a URL so that frontier de-duplication sees one spelling per page
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than http/https
/// 3. Lowercase the host
/// 4. Remove the fragment (everything after #)
/// 5. Remove a trailing slash from the path (except for the root /)
///
/// Hosts are never rewritten beyond case folding: scope checks require exact
/// host equality, so `www.example.com` and `example.com` stay distinct.
///
/// # Examples
///
/// ```
/// use site_scout::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM/page/#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) => {
            let lowered = host.to_lowercase();
            if lowered != host {
                url.set_host(Some(&lowered))
                    .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;
            }
        }
        None => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(&trimmed);
    }

    Ok(url)
}
