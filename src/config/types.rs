use crate::crawler::FrontierOrder;
use crate::url::ScopeMode;
use serde::Deserialize;

/// Main configuration structure for Site-Scout
///
/// Every field has a default, so the CLI runs without a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
    pub topics: TopicsConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hard ceiling on the number of URLs popped from the frontier
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// A page is kept iff its importance score is strictly greater than this
    #[serde(rename = "keep-threshold")]
    pub keep_threshold: f64,

    /// Pop order for pending URLs
    #[serde(rename = "frontier-order")]
    pub frontier_order: FrontierOrder,

    /// Whether candidate links are constrained to the start URL's path prefix
    /// or only to its host
    #[serde(rename = "scope-mode")]
    pub scope_mode: ScopeMode,

    /// Maximum number of characters of page text sent to the classifier
    #[serde(rename = "content-char-budget")]
    pub content_char_budget: usize,

    /// Rewrite the ranking document after every N kept pages
    #[serde(rename = "checkpoint-interval")]
    pub checkpoint_interval: u32,

    /// Per-request timeout for page fetches (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 500,
            keep_threshold: 0.3,
            frontier_order: FrontierOrder::Priority,
            scope_mode: ScopeMode::PathPrefix,
            content_char_budget: 8000,
            checkpoint_interval: 25,
            request_timeout_secs: 10,
        }
    }
}

/// Classifier collaborator configuration
///
/// The API key itself never appears in the config file; only the name of the
/// environment variable holding it does.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Model identifier sent with every classification request
    pub model: String,

    /// Base URL of the chat-completions endpoint
    #[serde(rename = "api-base")]
    pub api_base: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Rolling one-minute token budget for classification calls
    #[serde(rename = "tokens-per-minute")]
    pub tokens_per_minute: u32,

    /// Per-request timeout for classification calls (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            tokens_per_minute: 30_000,
            request_timeout_secs: 60,
        }
    }
}

/// Output location configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which per-site artifact directories are created
    #[serde(rename = "artifact-dir")]
    pub artifact_dir: String,

    /// Where `--export-summary` writes its markdown report; defaults to
    /// `<artifact-dir>/<site>/summary.md` when unset
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            artifact_dir: ".".to_string(),
            summary_path: None,
        }
    }
}

/// Core topic keywords used when computing semantic context across kept pages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub core: Vec<String>,
}
