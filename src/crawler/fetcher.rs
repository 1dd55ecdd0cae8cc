//! Page fetcher with retry logic
//!
//! This module turns one URL into one [`PageResult`], including:
//! - Scraping through Firecrawl
//! - Retrying rate-limited and timed-out attempts
//! - Recovering a title when the metadata has none
//!
//! A fetch never returns an error; failures become failed page results.

use crate::config::FirecrawlConfig;
use crate::crawler::firecrawl::{AttemptError, FirecrawlClient, ScrapedDocument};
use crate::crawler::parser::{extract_html_title, first_markdown_heading};
use crate::state::{PageMetadata, PageResult};
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can turn a URL into a page result
///
/// The batch scheduler fans out over this trait so alternative scrapers can be
/// plugged in.
#[async_trait]
pub trait PageScraper: Send + Sync + 'static {
    async fn scrape(&self, url: &str) -> PageResult;
}

/// Firecrawl-backed scraper with bounded retries
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 200 | Return the page |
/// | HTTP 429 | Wait `retry_delay × attempt`, retry |
/// | Timeout | Wait `retry_delay`, retry |
/// | Other status / error | Log, retry immediately |
///
/// No wait follows the final attempt.
pub struct Fetcher {
    client: FirecrawlClient,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher using the retry policy from `config`
    pub fn new(client: FirecrawlClient, config: &FirecrawlConfig) -> Self {
        Self {
            client,
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay(),
        }
    }

    /// Fetches a URL, retrying transient failures
    pub async fn fetch(&self, url: &str) -> PageResult {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            let more_attempts = attempt < self.max_attempts;

            match self.client.scrape(url).await {
                Ok(document) => {
                    tracing::debug!("Scraped {} on attempt {}", url, attempt);
                    return into_page_result(url, document);
                }
                Err(AttemptError::RateLimited) => {
                    let wait = rate_limit_backoff(self.retry_delay, attempt);
                    tracing::warn!(
                        "Rate limited scraping {} (attempt {}/{})",
                        url,
                        attempt,
                        self.max_attempts
                    );
                    last_error = AttemptError::RateLimited.to_string();
                    if more_attempts {
                        tokio::time::sleep(wait).await;
                    }
                }
                Err(AttemptError::Timeout) => {
                    tracing::warn!(
                        "Timeout scraping {} (attempt {}/{})",
                        url,
                        attempt,
                        self.max_attempts
                    );
                    last_error = AttemptError::Timeout.to_string();
                    if more_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to scrape {}: {}", url, e);
                    last_error = e.to_string();
                }
            }
        }

        PageResult::failed(
            url,
            format!("{} after {} attempts", last_error, self.max_attempts),
        )
    }
}

#[async_trait]
impl PageScraper for Fetcher {
    async fn scrape(&self, url: &str) -> PageResult {
        self.fetch(url).await
    }
}

/// Wait before retrying after the `attempt`-th (1-based) rate-limited attempt
///
/// Grows linearly: with a 2s base the waits are 2s, 4s, 6s, ...
pub fn rate_limit_backoff(base: Duration, attempt: u32) -> Duration {
    base * attempt.max(1)
}

/// Normalizes a scraped document into a successful page result
fn into_page_result(url: &str, document: ScrapedDocument) -> PageResult {
    let content = document.markdown.unwrap_or_default();

    let title = document
        .metadata
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| document.html.as_deref().and_then(extract_html_title))
        .or_else(|| first_markdown_heading(&content));

    let metadata = PageMetadata {
        title,
        description: document.metadata.description,
    };

    PageResult::scraped(url, content, metadata)
}
