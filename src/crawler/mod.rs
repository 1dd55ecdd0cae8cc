//! Crawler module for site mapping and page scraping
//!
//! This module contains the core crawling logic, including:
//! - The Firecrawl map and scrape client
//! - Per-page fetching with retry logic
//! - Batch scheduling with bounded concurrency
//! - Title extraction from scraped documents
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod firecrawl;
mod mapper;
mod parser;
mod scheduler;

pub use coordinator::{run_generation, Coordinator};
pub use fetcher::{rate_limit_backoff, Fetcher, PageScraper};
pub use firecrawl::{build_http_client, AttemptError, FirecrawlClient, ScrapedDocument};
pub use mapper::{fallback_urls, map_site, order_urls, FALLBACK_PATHS};
pub use parser::{extract_html_title, first_markdown_heading};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::output::RunStatistics;
use crate::LlmsError;

/// Runs a complete generation
///
/// This is the main entry point. It will:
/// 1. Map the site (falling back to common paths if mapping fails)
/// 2. Scrape pages in batches
/// 3. Summarize each successful page
/// 4. Write the index files
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Files were written
/// * `Err(LlmsError)` - No URLs were found, or output could not be written
pub async fn generate(config: Config) -> Result<RunStatistics, LlmsError> {
    run_generation(config).await
}
