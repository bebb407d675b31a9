//! URL handling for Site-Scout
//!
//! This module provides URL normalization (so frontier de-duplication sees
//! one spelling per page) and the crawl scope policy that decides which
//! discovered URLs are eligible for the frontier.

mod normalize;
mod scope;

pub use normalize::normalize_url;
pub use scope::{CrawlScope, ScopeMode};
