//! Site-Scout: an audience-focused website explorer
//!
//! This crate crawls a single website, scores each page's relevance to a
//! target audience through an external classifier, and persists a ranked,
//! content-annotated record of the pages that matter.

pub mod classifier;
pub mod config;
pub mod crawler;
pub mod output;
pub mod ranking;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Classifier error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Errors raised while fetching a page
///
/// Any of these causes the page to be skipped for the rest of the run; none
/// of them aborts the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML for {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },
}

/// Errors raised by the classifier collaborator
///
/// Classification failures degrade to the zero assessment; they never abort
/// the crawl. `MissingCredential` is the exception: it is raised during
/// setup, before any page is fetched.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Classifier credential missing: {0} is not set")]
    MissingCredential(String),

    #[error("Classifier request failed: {0}")]
    Network(String),

    #[error("Classifier API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Classifier returned an empty response")]
    EmptyResponse,
}

/// Errors raised while writing or reading artifacts
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("Failed to parse ranking document at {path}: {source}")]
    Deserialize {
        path: String,
        source: serde_json::Error,
    },
}

/// Result type alias for Site-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classifier::{Assessment, Classifier, ClassifyOutcome, ClassifyResponse, RateBudget};
pub use config::Config;
pub use crawler::{explore, CrawlDriver, ExploreReport, Frontier, FrontierOrder};
pub use output::{ArtifactStore, JsonArtifactStore, PageArtifact};
pub use ranking::{RankingAccumulator, RankingDocument, RankingEntry};
pub use url::{normalize_url, CrawlScope, ScopeMode};
