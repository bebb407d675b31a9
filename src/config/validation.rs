use crate::config::types::{ClassifierConfig, Config, CrawlerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_classifier_config(&config.classifier)?;
    Ok(())
}

/// Validates crawl behavior settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if !(0.0..=1.0).contains(&config.keep_threshold) {
        return Err(ConfigError::Validation(format!(
            "keep-threshold must be between 0.0 and 1.0, got {}",
            config.keep_threshold
        )));
    }

    if config.content_char_budget < 500 {
        return Err(ConfigError::Validation(format!(
            "content-char-budget must be >= 500, got {}",
            config.content_char_budget
        )));
    }

    if config.checkpoint_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "checkpoint-interval must be >= 1, got {}",
            config.checkpoint_interval
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates classifier collaborator settings
fn validate_classifier_config(config: &ClassifierConfig) -> Result<(), ConfigError> {
    if config.model.is_empty() {
        return Err(ConfigError::Validation(
            "classifier model cannot be empty".to_string(),
        ));
    }

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api-key-env cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.api_base)
        .map_err(|e| ConfigError::Validation(format!("Invalid api-base: {}", e)))?;

    if config.tokens_per_minute < 1 {
        return Err(ConfigError::Validation(format!(
            "tokens-per-minute must be >= 1, got {}",
            config.tokens_per_minute
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = Config::default();
        config.crawler.keep_threshold = 1.5;
        assert!(validate(&config).is_err());

        config.crawler.keep_threshold = -0.1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_tiny_content_budget_rejected() {
        let mut config = Config::default();
        config.crawler.content_char_budget = 100;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut config = Config::default();
        config.classifier.model = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_api_base_rejected() {
        let mut config = Config::default();
        config.classifier.api_base = "not a url".to_string();
        assert!(validate(&config).is_err());
    }
}
