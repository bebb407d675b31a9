//! Crawler module for exploring one site
//!
//! This module contains the core exploration logic:
//! - HTTP fetching and HTML content extraction
//! - The crawl frontier (visited/pending state and pop order)
//! - The per-page assessment pipeline
//! - The top-level crawl driver

mod coordinator;
mod extract;
mod fetcher;
mod frontier;
mod pipeline;

pub use coordinator::{CrawlDriver, DriverState, ExploreReport};
pub use extract::{extract_content, OutboundLink, PageContent};
pub use fetcher::{build_http_client, fetch_page};
pub use frontier::{Frontier, FrontierEntry, FrontierOrder};
pub use pipeline::{Assessor, PageAssessment};

use crate::classifier::OpenAiClassifier;
use crate::config::Config;
use crate::output::JsonArtifactStore;
use crate::Result;
use std::path::Path;
use tokio::sync::watch;

/// Runs a complete exploration of one site
///
/// Builds the classifier from configuration (reading the API key from the
/// configured environment variable), opens the artifact store under
/// `<artifact-dir>/<site>/`, and drives the crawl to completion.
///
/// # Arguments
///
/// * `config` - The exploration configuration
/// * `site` - Identifier naming the per-site output directory
/// * `start_url` - URL where exploration begins
/// * `cancel` - Watch channel; sending `true` drains the crawl after the
///   in-flight page completes
pub async fn explore(
    config: &Config,
    site: &str,
    start_url: &str,
    cancel: watch::Receiver<bool>,
) -> Result<ExploreReport> {
    let classifier = OpenAiClassifier::new(&config.classifier)?;
    let store = JsonArtifactStore::new(Path::new(&config.output.artifact_dir).join(site))?;

    let mut driver = CrawlDriver::new(config, start_url, classifier, store, cancel)?;
    driver.run().await
}
