//! HTML content extraction
//!
//! Turns a fetched HTML body into the [`PageContent`] the pipeline works
//! with: title, readable body text, and outbound links with their anchor
//! text. Chrome subtrees (scripts, styles, navigation, footers) are excluded
//! from text extraction so the classifier sees page substance, not page
//! furniture.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Subtrees whose text is never page substance
const SKIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "noscript", "head"];

/// One outbound link discovered on a page
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundLink {
    /// Absolute URL, fragment stripped
    pub url: String,

    /// Text of the anchor element, whitespace-collapsed (may be empty)
    pub anchor_text: String,
}

/// Everything the pipeline needs from one fetched page
///
/// Immutable; owned by the pipeline invocation that created it and discarded
/// after artifact construction.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub url: Url,
    pub title: String,
    pub text: String,

    /// Document order, de-duplicated by URL within the page
    pub outbound_links: Vec<OutboundLink>,
}

/// Extracts title, body text, and outbound links from an HTML document
pub fn extract_content(html: &str, base_url: &Url) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        url: base_url.clone(),
        title: extract_title(&document).unwrap_or_default(),
        text: extract_text(&document),
        outbound_links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the `<title>` tag
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects readable text, skipping chrome subtrees
fn extract_text(document: &Html) -> String {
    let mut pieces = Vec::new();
    collect_text(document.root_element(), &mut pieces);
    pieces.join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    if SKIPPED_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            collect_text(el, out);
        } else if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
    }
}

/// Extracts `<a href>` links, resolved against the base URL
///
/// Excluded: `javascript:`, `mailto:`, `tel:` and `data:` hrefs, anchors
/// with a `download` attribute, and anything that fails to resolve.
/// Fragments are stripped before de-duplication so `/page` and `/page#top`
/// count as one link.
fn extract_links(document: &Html, base_url: &Url) -> Vec<OutboundLink> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_link(href, base_url) else {
            continue;
        };

        if !seen.insert(resolved.clone()) {
            continue;
        }

        let anchor_text = element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        links.push(OutboundLink {
            url: resolved,
            anchor_text,
        });
    }

    links
}

/// Resolves an href to an absolute URL, or None if it should be excluded
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base_url.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/section/").unwrap()
    }

    #[test]
    fn test_extracts_title() {
        let html = "<html><head><title> Apply Now </title></head><body>Hi</body></html>";
        let content = extract_content(html, &base());
        assert_eq!(content.title, "Apply Now");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let content = extract_content("<html><body>Hi</body></html>", &base());
        assert_eq!(content.title, "");
    }

    #[test]
    fn test_text_skips_chrome() {
        let html = r#"<html><head><title>T</title><style>.x{}</style></head><body>
            <nav>Home About Contact</nav>
            <p>Application requirements are listed below.</p>
            <script>var x = "tracking";</script>
            <footer>Copyright 2026</footer>
        </body></html>"#;

        let content = extract_content(html, &base());
        assert!(content.text.contains("Application requirements"));
        assert!(!content.text.contains("tracking"));
        assert!(!content.text.contains("Copyright"));
        assert!(!content.text.contains("Home About Contact"));
    }

    #[test]
    fn test_links_resolved_and_deduped() {
        let html = r#"<body>
            <a href="/apply">Apply</a>
            <a href="/apply#requirements">Requirements</a>
            <a href="https://other.com/x">Elsewhere</a>
        </body>"#;

        let content = extract_content(html, &base());
        let urls: Vec<&str> = content
            .outbound_links
            .iter()
            .map(|l| l.url.as_str())
            .collect();

        // Fragment variant collapses into the first occurrence
        assert_eq!(
            urls,
            vec!["https://example.com/apply", "https://other.com/x"]
        );
        assert_eq!(content.outbound_links[0].anchor_text, "Apply");
    }

    #[test]
    fn test_relative_links_resolve_against_base() {
        let html = r#"<body><a href="deadlines.html">Deadlines</a></body>"#;
        let content = extract_content(html, &base());
        assert_eq!(
            content.outbound_links[0].url,
            "https://example.com/section/deadlines.html"
        );
    }

    #[test]
    fn test_special_schemes_excluded() {
        let html = r#"<body>
            <a href="mailto:admissions@example.com">Email</a>
            <a href="javascript:void(0)">Click</a>
            <a href="tel:+15551234567">Call</a>
            <a href="/real">Real</a>
        </body>"#;

        let content = extract_content(html, &base());
        assert_eq!(content.outbound_links.len(), 1);
        assert_eq!(content.outbound_links[0].url, "https://example.com/real");
    }

    #[test]
    fn test_download_links_excluded() {
        let html = r#"<body><a href="/brochure.pdf" download>Brochure</a></body>"#;
        let content = extract_content(html, &base());
        assert!(content.outbound_links.is_empty());
    }

    #[test]
    fn test_anchor_text_whitespace_collapsed() {
        let html = "<body><a href=\"/a\">  Spread \n  over   lines </a></body>";
        let content = extract_content(html, &base());
        assert_eq!(content.outbound_links[0].anchor_text, "Spread over lines");
    }
}
