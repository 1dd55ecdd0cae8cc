//! Configuration module for llmstxt-gen
//!
//! This module handles loading, layering and validating the run configuration.
//! Defaults cover everything but the API keys; an optional TOML file and the
//! command line refine them, and the result is validated exactly once.
//!
//! # Example
//!
//! ```no_run
//! use llmstxt_gen::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("llmstxt.toml")).unwrap();
//! println!("Crawling {} ({} URLs max)", config.site.base_url, config.site.max_urls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BatchConfig, Config, FirecrawlConfig, IndexFormat, LlmConfig, OutputConfig, SiteConfig,
    SummaryConfig, SummaryStyle,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, read_config, resolve_config, ConfigOverrides,
};
pub use validation::validate;
