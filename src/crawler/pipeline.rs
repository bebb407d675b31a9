//! Page assessment pipeline
//!
//! Orchestrates fetch → rate-budget wait → classify → validate-links for a
//! single URL. Fetch failures propagate (the driver skips the page);
//! classification failures degrade to the zero assessment so one bad
//! response can never stall a multi-hundred-page crawl.

use crate::classifier::{Assessment, Classifier, ClassifyOutcome, RateBudget};
use crate::crawler::extract::PageContent;
use crate::crawler::fetcher::fetch_page;
use crate::url::{normalize_url, CrawlScope};
use crate::FetchError;
use reqwest::Client;
use tokio::sync::watch;
use url::Url;

/// Result of assessing one URL
#[derive(Debug)]
pub struct PageAssessment {
    pub content: PageContent,
    pub assessment: Assessment,

    /// Recommended links that survived normalization and the scope check,
    /// ready for frontier insertion
    pub candidates: Vec<(Url, f64)>,

    /// Metered cost of the classification call
    pub tokens_used: u32,

    /// True when the zero assessment was substituted for a failed or
    /// unstructured classification
    pub degraded: bool,
}

/// Per-URL orchestration: fetch, classify within budget, validate links
pub struct Assessor<C: Classifier> {
    client: Client,
    classifier: C,
    budget: RateBudget,
    scope: CrawlScope,
    content_char_budget: usize,
}

impl<C: Classifier> Assessor<C> {
    pub fn new(
        client: Client,
        classifier: C,
        budget: RateBudget,
        scope: CrawlScope,
        content_char_budget: usize,
    ) -> Self {
        Self {
            client,
            classifier,
            budget,
            scope,
            content_char_budget,
        }
    }

    /// Assesses one URL
    ///
    /// The only suspension point besides IO is the rate-budget wait, which
    /// honors `cancel`; a cancelled wait falls through to the classification
    /// attempt so the in-flight page still completes before the driver
    /// drains.
    pub async fn assess(
        &mut self,
        url: &Url,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<PageAssessment, FetchError> {
        let content = fetch_page(&self.client, url).await?;

        if !self.budget.check_available() {
            tracing::debug!(url = %url, "classifier budget exhausted, waiting for window to roll");
            self.budget.wait_until_available(cancel).await;
        }

        let prefix = truncate_chars(&content.text, self.content_char_budget);
        let (assessment, tokens_used, degraded) = match self
            .classifier
            .classify(url.as_str(), &content.title, prefix)
            .await
        {
            Ok(response) => {
                self.budget.record_consumption(response.tokens_used);
                match response.outcome {
                    ClassifyOutcome::Structured(assessment) => {
                        (assessment, response.tokens_used, false)
                    }
                    ClassifyOutcome::Unstructured(raw) => {
                        tracing::warn!(
                            url = %url,
                            response_len = raw.len(),
                            "classifier returned unstructured output, treating page as unimportant"
                        );
                        (Assessment::zero(), response.tokens_used, true)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "classification failed, substituting zero assessment");
                (Assessment::zero(), 0, true)
            }
        };

        let candidates = self.validate_links(&assessment);

        Ok(PageAssessment {
            content,
            assessment,
            candidates,
            tokens_used,
            degraded,
        })
    }

    /// Filters recommended links down to normalized, in-scope frontier
    /// candidates; rejects are expected and silent
    fn validate_links(&self, assessment: &Assessment) -> Vec<(Url, f64)> {
        assessment
            .recommended_links
            .iter()
            .filter_map(|link| {
                let url = match normalize_url(&link.url) {
                    Ok(url) => url,
                    Err(_) => {
                        tracing::trace!(url = %link.url, "dropping malformed recommended link");
                        return None;
                    }
                };

                if !self.scope.contains(&url) {
                    tracing::trace!(url = %url, "dropping out-of-scope recommended link");
                    return None;
                }

                Some((url, link.priority))
            })
            .collect()
    }
}

/// Truncates to a character budget on a char boundary
fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
