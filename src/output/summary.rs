//! Markdown summary generation
//!
//! Renders a persisted ranking document as a human-readable report: run
//! metadata, the cross-page topic overview, and the ranked page table.

use crate::ranking::RankingDocument;
use crate::PersistError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a ranking document to a file
pub fn generate_markdown_summary(
    document: &RankingDocument,
    output_path: &Path,
) -> Result<(), PersistError> {
    let markdown = format_markdown_summary(document);

    let mut file = File::create(output_path).map_err(|e| PersistError::Io {
        path: output_path.display().to_string(),
        source: e,
    })?;
    file.write_all(markdown.as_bytes())
        .map_err(|e| PersistError::Io {
            path: output_path.display().to_string(),
            source: e,
        })?;

    Ok(())
}

/// Formats a ranking document as markdown
pub fn format_markdown_summary(document: &RankingDocument) -> String {
    let mut md = String::new();

    md.push_str("# Site-Scout Exploration Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Base Domain**: {}\n",
        document.metadata.base_domain
    ));
    md.push_str(&format!(
        "- **Explored**: {}\n",
        document.metadata.exploration_timestamp
    ));
    md.push_str(&format!(
        "- **Pages Kept**: {}\n\n",
        document.metadata.total_pages
    ));

    if !document.metadata.topic_overview.is_empty() {
        md.push_str("## Topic Overview\n\n");
        md.push_str("| Topic | Pages |\n");
        md.push_str("|-------|-------|\n");
        for topic in &document.metadata.topic_overview {
            md.push_str(&format!("| {} | {} |\n", topic.topic, topic.pages));
        }
        md.push('\n');
    }

    md.push_str("## Page Ranking\n\n");
    if document.ranking.is_empty() {
        md.push_str("No pages passed the keep threshold.\n");
    } else {
        md.push_str("| Rank | Score | URL | Tags |\n");
        md.push_str("|------|-------|-----|------|\n");
        for (rank, entry) in document.ranking.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {:.2} | {} | {} |\n",
                rank + 1,
                entry.importance_score,
                entry.url,
                entry.tags.join(", ")
            ));
        }
    }

    md
}
