//! Content classification collaborator
//!
//! The classifier receives a bounded prefix of a page's text and returns a
//! structured assessment: an importance score for the target audience, tags,
//! an abstract, and links worth following. It consumes a metered token
//! budget, so every response reports its cost back to [`RateBudget`].
//!
//! The wire response is modeled as a tagged outcome: either it parsed into
//! the canonical [`Assessment`] schema, or it came back as free text. Free
//! text is never guessed at — callers map it to [`Assessment::zero`].

mod budget;
mod openai;

pub use budget::RateBudget;
pub use openai::OpenAiClassifier;

pub use crate::ClassifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Category assigned to a recommended link by the classifier
///
/// Unknown categories deserialize to `Other` rather than failing the whole
/// assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Navigation,
    Content,
    Application,
    Resource,
    #[serde(other)]
    Other,
}

/// A link the classifier suggests following, with its expected value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedLink {
    pub url: String,
    pub priority: f64,
    pub kind: LinkKind,
}

/// Structured page assessment
///
/// `importance_score` is conventionally 0.0–1.0 but the schema imposes no
/// clamp; consumers must tolerate out-of-range values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub importance_score: f64,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    #[serde(default)]
    pub recommended_links: Vec<RecommendedLink>,

    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl Assessment {
    /// The zero assessment substituted when classification fails or returns
    /// unusable data: score 0, all collections empty. A page assessed this
    /// way is never kept and contributes no candidate links.
    pub fn zero() -> Self {
        Self {
            importance_score: 0.0,
            tags: Vec::new(),
            abstract_text: String::new(),
            recommended_links: Vec::new(),
            related_topics: Vec::new(),
        }
    }
}

/// What came back over the wire
#[derive(Debug, Clone)]
pub enum ClassifyOutcome {
    /// The response parsed into the canonical schema
    Structured(Assessment),

    /// The response was text that did not match the schema; callers map
    /// this to the zero assessment
    Unstructured(String),
}

/// A classifier response plus the tokens it cost
#[derive(Debug, Clone)]
pub struct ClassifyResponse {
    pub outcome: ClassifyOutcome,

    /// Actual metered cost, known only after the call; callers report it
    /// to [`RateBudget::record_consumption`]
    pub tokens_used: u32,
}

/// The classification collaborator seam
///
/// Implementations are failure-prone and rate limited; callers own both the
/// zero-assessment fallback and the budget accounting.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        url: &str,
        title: &str,
        text_prefix: &str,
    ) -> Result<ClassifyResponse, ClassifyError>;
}
