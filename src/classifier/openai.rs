//! OpenAI-style chat-completions classifier
//!
//! Speaks the chat-completions wire format against a configurable base URL
//! (tests point it at a mock server). Prompt wording is entirely internal to
//! this module; the rest of the crate only sees [`Assessment`] values.

use crate::config::ClassifierConfig;
use crate::ClassifyError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{Assessment, Classifier, ClassifyOutcome, ClassifyResponse};

const SYSTEM_PROMPT: &str = "\
You analyze one webpage from a website being explored for a specific audience.\n\
Return ONLY a JSON object with this exact shape:\n\
{\n\
  \"importance_score\": <number 0.0-1.0, how much this page matters to the audience>,\n\
  \"tags\": [<short topic labels for the page>],\n\
  \"abstract\": \"<summary of the key content, at most 100 words>\",\n\
  \"recommended_links\": [\n\
    {\"url\": \"<absolute url>\", \"priority\": <number 0.0-1.0>,\n\
     \"kind\": \"navigation\" | \"content\" | \"application\" | \"resource\" | \"other\"}\n\
  ],\n\
  \"related_topics\": [<broader topics this page connects to>]\n\
}\n\
Recommend only links likely to lead to pages the audience cares about.";

/// Classifier backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiClassifier {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClassifier {
    /// Creates a classifier, reading the API key from the configured
    /// environment variable
    ///
    /// Fails with [`ClassifyError::MissingCredential`] when the variable is
    /// unset, so the CLI can refuse to start instead of failing mid-crawl.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifyError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ClassifyError::MissingCredential(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    /// Creates a classifier with an explicit API key (tests use this)
    pub fn with_api_key(
        config: &ClassifierConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ClassifyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Overrides the endpoint base URL (for mock servers and proxies)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Deserialize)]
struct ChatResponseRaw {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    async fn classify(
        &self,
        url: &str,
        title: &str,
        text_prefix: &str,
    ) -> Result<ClassifyResponse, ClassifyError> {
        let user_payload = json!({
            "url": url,
            "title": title,
            "content": text_prefix,
        })
        .to_string();

        let body = json!({
            "model": self.model,
            "temperature": 0.1,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_payload},
            ],
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        // Cost is reported post-hoc; a missing usage block counts as free
        let tokens_used = raw.usage.map(|u| u.total_tokens).unwrap_or(0);

        let content = raw
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ClassifyError::EmptyResponse)?;

        let cleaned = strip_code_fences(&content);
        let outcome = match serde_json::from_str::<Assessment>(cleaned) {
            Ok(assessment) => ClassifyOutcome::Structured(assessment),
            Err(e) => {
                tracing::debug!(url, error = %e, "classifier response did not match schema");
                ClassifyOutcome::Unstructured(content)
            }
        };

        Ok(ClassifyResponse {
            outcome,
            tokens_used,
        })
    }
}

/// Removes a surrounding markdown code fence, if present
///
/// Models wrap JSON in ```json fences often enough that parsing the raw
/// content first would misclassify perfectly good responses.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);

    match rest.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => rest,
    }
}
