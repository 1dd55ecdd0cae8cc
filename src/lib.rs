//! llmstxt-gen: builds `llms.txt` index files for a website
//!
//! This crate maps a site through the Firecrawl API, scrapes every page in
//! throttled batches, summarizes each page with an OpenAI chat model and writes
//! a compact link index plus a full-content dump for language-model agents.

pub mod config;
pub mod crawler;
pub mod llm;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for llmstxt-gen operations
#[derive(Debug, Error)]
pub enum LlmsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{endpoint} returned HTTP {status}")]
    Api { endpoint: String, status: u16 },

    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("No URLs discovered for {site}")]
    NoUrls { site: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: {0} (pass it on the command line or set the environment variable)")]
    MissingCredential(&'static str),
}

/// Result type alias for llmstxt-gen operations
pub type Result<T> = std::result::Result<T, LlmsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use state::{PageMetadata, PageResult};
pub use crate::url::{prioritize, ContentKind};
