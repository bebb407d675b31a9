//! Ranking accumulation and the final ranking document
//!
//! The accumulator collects one summary per kept page in discovery order.
//! `finalize` derives the output document: entries sorted by importance
//! score descending (stable, so equal scores keep discovery order), each
//! annotated with a semantic context cross-referencing tags and topics
//! against the other kept pages and the configured core topic keywords.
//! Output order comes solely from this sort, never from insertion timing.

use crate::classifier::Assessment;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One kept page in the final ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub url: String,
    pub tags: Vec<String>,
    pub importance_score: f64,
    pub related_topics: Vec<String>,

    /// Tags/topics this page shares with other kept pages, plus matches
    /// against the core topic keywords
    pub semantic_context: Vec<String>,
}

/// How often a label appeared across kept pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub pages: u32,
}

/// Document-level metadata for one exploration run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingMetadata {
    pub total_pages: u32,
    pub exploration_timestamp: String,
    pub base_domain: String,
    pub topic_overview: Vec<TopicCount>,
}

/// The persisted ranking artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingDocument {
    pub ranking: Vec<RankingEntry>,
    pub metadata: RankingMetadata,
}

#[derive(Debug, Clone)]
struct Recorded {
    url: String,
    tags: Vec<String>,
    importance_score: f64,
    related_topics: Vec<String>,
}

impl Recorded {
    /// All labels of this page (tags and topics), de-duplicated
    fn labels(&self) -> HashSet<&str> {
        self.tags
            .iter()
            .chain(self.related_topics.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Collects per-URL assessment summaries and produces the sorted ranking
///
/// Owned by exactly one driver until final serialization. `finalize` is
/// idempotent: it may be called repeatedly (checkpointing) without mutating
/// already-recorded entries.
#[derive(Debug)]
pub struct RankingAccumulator {
    base_domain: String,
    core_topics: Vec<String>,
    entries: Vec<Recorded>,
}

impl RankingAccumulator {
    pub fn new(base_domain: impl Into<String>, core_topics: Vec<String>) -> Self {
        Self {
            base_domain: base_domain.into(),
            core_topics: core_topics
                .into_iter()
                .map(|t| t.to_lowercase())
                .collect(),
            entries: Vec::new(),
        }
    }

    /// Appends a kept page; discovery order is the tie-break for the sort
    pub fn record(&mut self, url: &str, assessment: &Assessment) {
        self.entries.push(Recorded {
            url: url.to_string(),
            tags: assessment.tags.clone(),
            importance_score: assessment.importance_score,
            related_topics: assessment.related_topics.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produces the sorted, annotated ranking document
    pub fn finalize(&self) -> RankingDocument {
        // Pages per label across the whole kept set
        let mut label_pages: HashMap<String, u32> = HashMap::new();
        for entry in &self.entries {
            for label in entry.labels() {
                *label_pages.entry(label.to_lowercase()).or_insert(0) += 1;
            }
        }

        // Stable sort keeps discovery order for equal scores
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            self.entries[b]
                .importance_score
                .total_cmp(&self.entries[a].importance_score)
        });

        let ranking = order
            .into_iter()
            .map(|idx| {
                let entry = &self.entries[idx];
                RankingEntry {
                    url: entry.url.clone(),
                    tags: entry.tags.clone(),
                    importance_score: entry.importance_score,
                    related_topics: entry.related_topics.clone(),
                    semantic_context: self.semantic_context(entry, &label_pages),
                }
            })
            .collect();

        RankingDocument {
            ranking,
            metadata: RankingMetadata {
                total_pages: self.entries.len() as u32,
                exploration_timestamp: Utc::now().to_rfc3339(),
                base_domain: self.base_domain.clone(),
                topic_overview: topic_overview(&label_pages),
            },
        }
    }

    /// Labels of one page that carry cross-page meaning: shared with at
    /// least one other kept page, or matching a core topic keyword
    fn semantic_context(&self, entry: &Recorded, label_pages: &HashMap<String, u32>) -> Vec<String> {
        let mut context: Vec<String> = entry
            .labels()
            .into_iter()
            .filter(|label| {
                let lowered = label.to_lowercase();
                let shared = label_pages.get(&lowered).copied().unwrap_or(0) >= 2;
                shared || self.core_topics.contains(&lowered)
            })
            .map(str::to_string)
            .collect();

        context.sort();
        context
    }
}

/// Labels that appear on more than one page, most common first
fn topic_overview(label_pages: &HashMap<String, u32>) -> Vec<TopicCount> {
    let mut overview: Vec<TopicCount> = label_pages
        .iter()
        .filter(|(_, &pages)| pages >= 2)
        .map(|(topic, &pages)| TopicCount {
            topic: topic.clone(),
            pages,
        })
        .collect();

    overview.sort_by(|a, b| b.pages.cmp(&a.pages).then_with(|| a.topic.cmp(&b.topic)));
    overview
}
