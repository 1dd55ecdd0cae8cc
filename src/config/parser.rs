use crate::config::types::{Config, IndexFormat, SummaryStyle};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Values supplied on the command line (or its environment fallbacks)
///
/// Each `Some` replaces the corresponding config-file value.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub max_urls: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub focus_paths: Option<Vec<String>>,
    pub no_prioritize: bool,
    pub firecrawl_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub no_full_text: bool,
    pub format: Option<IndexFormat>,
    pub style: Option<SummaryStyle>,
}

/// Reads and parses a configuration file without validating it
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Loads, parses and validates a configuration file
///
/// The file must carry both API keys; use [`resolve_config`] when they come
/// from the command line or the environment.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use llmstxt_gen::config::load_config;
///
/// let config = load_config(Path::new("llmstxt.toml")).unwrap();
/// println!("Batch size: {}", config.batch.batch_size);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the same settings.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Builds the effective configuration for a run
///
/// Layers defaults, the optional config file and the command-line overrides,
/// then validates the result once. Returns the config file hash when a file
/// was used.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (mut config, hash) = match path {
        Some(path) => (read_config(path)?, Some(compute_config_hash(path)?)),
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, overrides);
    validate(&config)?;

    Ok((config, hash))
}

fn apply_overrides(config: &mut Config, overrides: ConfigOverrides) {
    if let Some(base_url) = overrides.base_url {
        config.site.base_url = base_url;
    }
    if let Some(max_urls) = overrides.max_urls {
        config.site.max_urls = max_urls;
    }
    if let Some(focus_paths) = overrides.focus_paths {
        config.site.focus_paths = focus_paths;
    }
    if overrides.no_prioritize {
        config.site.prioritize = false;
    }
    if let Some(output_dir) = overrides.output_dir {
        config.output.output_dir = output_dir;
    }
    if overrides.no_full_text {
        config.output.full_text = false;
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if let Some(style) = overrides.style {
        config.summary.style = style;
    }
    if overrides.firecrawl_api_key.is_some() {
        config.firecrawl.api_key = overrides.firecrawl_api_key;
    }
    if overrides.openai_api_key.is_some() {
        config.llm.api_key = overrides.openai_api_key;
    }
}
