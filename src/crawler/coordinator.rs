//! Crawl driver - top-level exploration loop
//!
//! Pulls URLs from the frontier, drives the assessment pipeline, feeds the
//! ranking accumulator, and persists artifacts. The driver moves through
//! `Seeded → Running → Draining → Done`; either loop-exit condition (empty
//! frontier or page cap) or external cancellation sends it to `Draining`,
//! where the ranking document is finalized and written no matter how the
//! run went.

use crate::classifier::Classifier;
use crate::config::Config;
use crate::crawler::frontier::Frontier;
use crate::crawler::pipeline::{Assessor, PageAssessment};
use crate::output::{ArtifactStore, PageArtifact};
use crate::ranking::RankingAccumulator;
use crate::url::{normalize_url, CrawlScope};
use crate::{ScoutError, UrlError};
use std::time::Instant;
use tokio::sync::watch;

/// Lifecycle of one exploration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Frontier holds exactly the start URL
    Seeded,

    /// Main loop is popping and assessing
    Running,

    /// Loop exited; ranking is being finalized and persisted
    Draining,

    /// Terminal; no further mutation of any component
    Done,
}

/// Outcome counters for one exploration run
#[derive(Debug, Clone, Default)]
pub struct ExploreReport {
    /// Distinct URLs popped from the frontier (the page cap applies here)
    pub pages_visited: u32,

    /// Pages whose importance cleared the keep threshold
    pub pages_kept: u32,

    pub fetch_failures: u32,
    pub classify_failures: u32,

    /// Page-artifact writes that failed; surfaced, never swallowed
    pub persist_failures: u32,

    /// Total metered classifier cost for the run
    pub tokens_spent: u64,

    /// True when the run drained early on an external cancellation
    pub cancelled: bool,
}

/// The top-level crawl loop for one site
///
/// Exclusively owns its frontier and ranking accumulator; one driver per
/// run, one run at a time.
pub struct CrawlDriver<C: Classifier, S: ArtifactStore> {
    keep_threshold: f64,
    max_pages: u32,
    checkpoint_interval: u32,
    frontier: Frontier,
    assessor: Assessor<C>,
    ranking: RankingAccumulator,
    store: S,
    state: DriverState,
    cancel: watch::Receiver<bool>,
}

impl<C: Classifier, S: ArtifactStore> CrawlDriver<C, S> {
    /// Seeds a driver with the start URL
    pub fn new(
        config: &Config,
        start_url: &str,
        classifier: C,
        store: S,
        cancel: watch::Receiver<bool>,
    ) -> Result<Self, ScoutError> {
        let start_url = normalize_url(start_url)?;
        let base_domain = start_url
            .host_str()
            .ok_or(UrlError::MissingHost)?
            .to_string();

        let scope = CrawlScope::new(&start_url, config.crawler.scope_mode)?;
        let client = crate::crawler::fetcher::build_http_client(config.crawler.request_timeout_secs)?;
        let budget = crate::classifier::RateBudget::new(config.classifier.tokens_per_minute);

        let mut frontier = Frontier::new(config.crawler.frontier_order);
        frontier.seed(start_url);

        Ok(Self {
            keep_threshold: config.crawler.keep_threshold,
            max_pages: config.crawler.max_pages,
            checkpoint_interval: config.crawler.checkpoint_interval,
            frontier,
            assessor: Assessor::new(
                client,
                classifier,
                budget,
                scope,
                config.crawler.content_char_budget,
            ),
            ranking: RankingAccumulator::new(base_domain, config.topics.core.clone()),
            store,
            state: DriverState::Seeded,
            cancel,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Runs the exploration to completion
    ///
    /// Per-page failures are contained here; only ranking-document
    /// persistence failures propagate.
    pub async fn run(&mut self) -> Result<ExploreReport, ScoutError> {
        self.state = DriverState::Running;
        let started = Instant::now();
        let mut report = ExploreReport::default();

        while report.pages_visited < self.max_pages {
            // Cancellation is honored between URLs, never mid-assessment
            if *self.cancel.borrow() {
                tracing::info!("cancellation requested, draining");
                report.cancelled = true;
                break;
            }

            let Some(entry) = self.frontier.pop_next() else {
                tracing::info!("frontier is empty, exploration complete");
                break;
            };
            report.pages_visited += 1;
            tracing::info!(url = %entry.url, pending = self.frontier.len(), "exploring");

            match self.assessor.assess(&entry.url, &mut self.cancel).await {
                Err(e) => {
                    tracing::warn!(url = %entry.url, error = %e, "fetch failed, skipping page");
                    report.fetch_failures += 1;
                }
                Ok(page) => {
                    report.tokens_spent += u64::from(page.tokens_used);
                    if page.degraded {
                        report.classify_failures += 1;
                    }
                    self.handle_assessed_page(page, &mut report);
                }
            }

            if report.pages_visited % 10 == 0 {
                let rate = f64::from(report.pages_visited) / started.elapsed().as_secs_f64();
                tracing::info!(
                    visited = report.pages_visited,
                    kept = report.pages_kept,
                    pending = self.frontier.len(),
                    "progress: {:.2} pages/sec",
                    rate
                );
            }
        }

        self.state = DriverState::Draining;

        // The ranking document is always written, even for a run that kept
        // nothing; a failure here is the one persistence error that is fatal
        let document = self.ranking.finalize();
        self.store.write_ranking(&document)?;

        self.state = DriverState::Done;
        tracing::info!(
            visited = report.pages_visited,
            kept = report.pages_kept,
            fetch_failures = report.fetch_failures,
            classify_failures = report.classify_failures,
            tokens = report.tokens_spent,
            elapsed = ?started.elapsed(),
            "exploration finished"
        );

        Ok(report)
    }

    /// Keep decision plus everything that follows from it
    fn handle_assessed_page(&mut self, page: PageAssessment, report: &mut ExploreReport) {
        let url = page.content.url.clone();
        let score = page.assessment.importance_score;

        if score <= self.keep_threshold {
            tracing::debug!(url = %url, score, "below keep threshold, dead end");
            return;
        }

        report.pages_kept += 1;

        // Artifact write failure is surfaced but does not unkeep the page:
        // the ranking entry and discovered links are still good
        let artifact = PageArtifact::build(&page.content, &page.assessment);
        if let Err(e) = self.store.write_page(&artifact) {
            tracing::error!(url = %url, error = %e, "failed to persist page artifact");
            report.persist_failures += 1;
        }

        self.ranking.record(url.as_str(), &page.assessment);

        for (candidate, priority) in page.candidates {
            if self.frontier.add_candidate(candidate.clone(), priority) {
                tracing::debug!(url = %candidate, priority, "enqueued candidate link");
            }
        }

        if report.pages_kept % self.checkpoint_interval == 0 {
            // Checkpoint so an interrupted run still leaves a usable ranking
            if let Err(e) = self.store.write_ranking(&self.ranking.finalize()) {
                tracing::warn!(error = %e, "ranking checkpoint failed");
            }
        }
    }
}
