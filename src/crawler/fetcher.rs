//! HTTP fetcher
//!
//! Retrieves one page and hands the body to extraction. Every failure mode
//! maps to a [`FetchError`] variant; the driver treats them all the same way
//! (skip the page, keep crawling), so the classification here exists for
//! logs and the run report rather than control flow.

use crate::crawler::extract::{extract_content, PageContent};
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used for all page fetches in a run
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("site-scout/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and extracts its content
///
/// # Failure modes
///
/// * Network error or timeout → [`FetchError::Timeout`] / [`FetchError::Http`]
/// * Non-2xx status → [`FetchError::Status`]
/// * Content-Type present but not HTML → [`FetchError::NotHtml`]
///
/// A missing Content-Type header is tolerated and treated as HTML.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<PageContent, FetchError> {
    let response = client.get(url.clone()).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Http {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("text/html") {
        return Err(FetchError::NotHtml {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: e,
    })?;

    Ok(extract_content(&body, url))
}
