use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure for llmstxt-gen
///
/// Every section has defaults, so an empty TOML file (or no file at all) is a
/// complete configuration apart from the two API keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub firecrawl: FirecrawlConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The site being indexed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL of the site to map
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of URLs to process
    #[serde(rename = "max-urls")]
    pub max_urls: usize,

    /// Path fragments whose URLs are moved to the front of the crawl
    #[serde(rename = "focus-paths")]
    pub focus_paths: Vec<String>,

    /// Whether focus-path URLs are moved first
    pub prioritize: bool,

    /// Whether the mapper may consult the site's sitemap
    #[serde(rename = "include-sitemap")]
    pub include_sitemap: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.sidetool.co".to_string(),
            max_urls: 150,
            focus_paths: vec!["/blog".to_string()],
            prioritize: true,
            include_sitemap: true,
        }
    }
}

/// Firecrawl API access and scrape retry policy
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct FirecrawlConfig {
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    #[serde(rename = "api-base")]
    pub api_base: String,

    /// Render wait passed to the scrape endpoint (milliseconds)
    #[serde(rename = "wait-for")]
    pub wait_for: u64,

    /// Per-request timeout for scrape calls (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Total scrape attempts per URL
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts (milliseconds)
    #[serde(rename = "retry-delay")]
    pub retry_delay: u64,
}

impl FirecrawlConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay)
    }
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.firecrawl.dev".to_string(),
            wait_for: 2000,
            request_timeout: 30,
            max_attempts: 3,
            retry_delay: 2000,
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for FirecrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirecrawlConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("wait_for", &self.wait_for)
            .field("request_timeout", &self.request_timeout)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

/// Chat-completion API access
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    #[serde(rename = "api-base")]
    pub api_base: String,

    pub model: String,

    /// Token cap; when unset the summary style picks one
    #[serde(rename = "max-tokens")]
    pub max_tokens: Option<u32>,

    pub temperature: f32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl LlmConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: None,
            temperature: 0.3,
            request_timeout: 60,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// How page summaries are requested and merged with scraped metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub style: SummaryStyle,

    /// Use the page's own meta description instead of generating one
    #[serde(rename = "prefer-metadata")]
    pub prefer_metadata: bool,

    /// Characters of page content sent to the model
    #[serde(rename = "max-input-chars")]
    pub max_input_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            style: SummaryStyle::Labeled,
            prefer_metadata: true,
            max_input_chars: 3000,
        }
    }
}

/// Batching and fan-out of scrape calls
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// URLs per batch
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Scrape calls in flight at once
    pub concurrency: usize,

    /// Pause between batches (milliseconds)
    #[serde(rename = "batch-delay")]
    pub batch_delay: u64,
}

impl BatchConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            concurrency: 10,
            batch_delay: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving llms.txt and llms-full.txt
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Whether llms-full.txt is written
    #[serde(rename = "full-text")]
    pub full_text: bool,

    pub format: IndexFormat,

    /// Content characters kept per page in llms-full.txt
    #[serde(rename = "max-content-chars")]
    pub max_content_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./public"),
            full_text: true,
            format: IndexFormat::Links,
            max_content_chars: 5000,
        }
    }
}

/// Layout of the generated index files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    /// `- [Title](url): description` items
    Links,
    /// `# Title` / `URL:` / `Description:` blocks under a commented header
    Sections,
}

impl FromStr for IndexFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "links" => Ok(Self::Links),
            "sections" => Ok(Self::Sections),
            other => Err(format!("unknown index format '{}'", other)),
        }
    }
}

/// Shape of the summary requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    /// `Title:` and `Description:` lines
    Labeled,
    /// Free-form 2-3 sentence summary
    Prose,
}

impl SummaryStyle {
    /// Token cap used when the config leaves `max-tokens` unset
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            Self::Labeled => 50,
            Self::Prose => 150,
        }
    }
}

impl FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "labeled" => Ok(Self::Labeled),
            "prose" => Ok(Self::Prose),
            other => Err(format!("unknown summary style '{}'", other)),
        }
    }
}
