//! Durable JSON artifact storage
//!
//! One JSON document per kept page, named by the hex SHA-256 digest of its
//! URL so concurrent writers targeting distinct URLs never conflict, plus a
//! single ranking document per site. The store is append-mostly: page
//! writes for the same URL overwrite deterministically.

use crate::classifier::{Assessment, RecommendedLink};
use crate::crawler::PageContent;
use crate::ranking::RankingDocument;
use crate::PersistError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted record of one kept page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageArtifact {
    pub url: String,
    pub tags: Vec<String>,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Full extracted page text, not the classifier-truncated prefix
    pub content: String,

    pub related_topics: Vec<String>,
    pub importance_score: f64,
    pub recommended_links: Vec<RecommendedLink>,

    /// ISO-8601 write timestamp
    pub timestamp: String,
}

impl PageArtifact {
    pub fn build(content: &PageContent, assessment: &Assessment) -> Self {
        Self {
            url: content.url.to_string(),
            tags: assessment.tags.clone(),
            abstract_text: assessment.abstract_text.clone(),
            content: content.text.clone(),
            related_topics: assessment.related_topics.clone(),
            importance_score: assessment.importance_score,
            recommended_links: assessment.recommended_links.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Where artifacts go
///
/// Page-artifact write failures are surfaced to the operator but must not
/// abort the crawl; the driver owns that policy.
pub trait ArtifactStore {
    fn write_page(&self, artifact: &PageArtifact) -> Result<(), PersistError>;
    fn write_ranking(&self, document: &RankingDocument) -> Result<(), PersistError>;
    fn read_ranking(&self) -> Result<RankingDocument, PersistError>;
}

/// Filesystem store: `<root>/pages/<sha256>.json` plus
/// `<root>/page_ranking.json`
pub struct JsonArtifactStore {
    root: PathBuf,
}

impl JsonArtifactStore {
    /// Opens (and creates) the store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let root = root.into();
        let pages = root.join("pages");
        fs::create_dir_all(&pages).map_err(|e| PersistError::Io {
            path: pages.display().to_string(),
            source: e,
        })?;

        Ok(Self { root })
    }

    /// Stable digest-keyed path for a page artifact
    pub fn page_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest = hex::encode(hasher.finalize());
        self.root.join("pages").join(format!("{}.json", digest))
    }

    pub fn ranking_path(&self) -> PathBuf {
        self.root.join("page_ranking.json")
    }

    fn write_json<T: Serialize>(
        path: &Path,
        value: &T,
        what: &'static str,
    ) -> Result<(), PersistError> {
        let json =
            serde_json::to_string_pretty(value).map_err(|e| PersistError::Serialize {
                what,
                source: e,
            })?;

        fs::write(path, json).map_err(|e| PersistError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl ArtifactStore for JsonArtifactStore {
    fn write_page(&self, artifact: &PageArtifact) -> Result<(), PersistError> {
        Self::write_json(&self.page_path(&artifact.url), artifact, "page artifact")
    }

    fn write_ranking(&self, document: &RankingDocument) -> Result<(), PersistError> {
        Self::write_json(&self.ranking_path(), document, "ranking document")
    }

    fn read_ranking(&self) -> Result<RankingDocument, PersistError> {
        let path = self.ranking_path();
        let content = fs::read_to_string(&path).map_err(|e| PersistError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| PersistError::Deserialize {
            path: path.display().to_string(),
            source: e,
        })
    }
}
