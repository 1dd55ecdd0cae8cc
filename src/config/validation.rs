use crate::config::types::{
    BatchConfig, Config, FirecrawlConfig, LlmConfig, OutputConfig, SiteConfig, SummaryConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_firecrawl_config(&config.firecrawl)?;
    validate_llm_config(&config.llm)?;
    validate_summary_config(&config.summary)?;
    validate_batch_config(&config.batch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;

    if config.max_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "max-urls must be >= 1, got {}",
            config.max_urls
        )));
    }

    for path in &config.focus_paths {
        if !path.starts_with('/') || path.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "focus path '{}' must start with '/' and name a segment",
                path
            )));
        }
    }

    Ok(())
}

/// Validates Firecrawl access and retry settings
fn validate_firecrawl_config(config: &FirecrawlConfig) -> Result<(), ConfigError> {
    require_key(config.api_key.as_deref(), "FIRECRAWL_API_KEY")?;
    validate_http_url("firecrawl api-base", &config.api_base)?;

    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(
            "firecrawl request-timeout must be >= 1s".to_string(),
        ));
    }

    Ok(())
}

/// Validates chat-completion settings
fn validate_llm_config(config: &LlmConfig) -> Result<(), ConfigError> {
    require_key(config.api_key.as_deref(), "OPENAI_API_KEY")?;
    validate_http_url("llm api-base", &config.api_base)?;

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    if config.max_tokens == Some(0) {
        return Err(ConfigError::Validation(
            "max-tokens must be >= 1".to_string(),
        ));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(
            "llm request-timeout must be >= 1s".to_string(),
        ));
    }

    Ok(())
}

fn validate_summary_config(config: &SummaryConfig) -> Result<(), ConfigError> {
    if config.max_input_chars < 100 {
        return Err(ConfigError::Validation(format!(
            "max-input-chars must be >= 100, got {}",
            config.max_input_chars
        )));
    }
    Ok(())
}

/// Validates batching settings
fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    if config.max_content_chars < 1 {
        return Err(ConfigError::Validation(
            "max-content-chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn require_key(key: Option<&str>, name: &'static str) -> Result<(), ConfigError> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::MissingCredential(name)),
    }
}

/// Checks that `value` parses as an absolute http(s) URL with a host
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
