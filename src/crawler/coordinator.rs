//! Run coordinator - main generation pipeline
//!
//! One run goes through these stages in order:
//! - Map the site into an ordered URL list
//! - Scrape every URL in throttled batches
//! - Summarize the successful pages one at a time
//! - Write `llms.txt` and `llms-full.txt`

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::firecrawl::FirecrawlClient;
use crate::crawler::mapper::map_site;
use crate::crawler::scheduler::Scheduler;
use crate::llm::{OpenAiClient, Summarizer};
use crate::output::{write_index_files, IndexHeader, RunStatistics};
use crate::state::PageResult;
use crate::LlmsError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Main pipeline coordinator
pub struct Coordinator {
    config: Config,
    client: FirecrawlClient,
    fetcher: Arc<Fetcher>,
    scheduler: Scheduler,
    summarizer: Summarizer<OpenAiClient>,
}

impl Coordinator {
    /// Creates a coordinator from validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Clients built successfully
    /// * `Err(LlmsError)` - A credential is missing or an HTTP client failed to build
    pub fn new(config: Config) -> Result<Self, LlmsError> {
        let client = FirecrawlClient::new(&config.firecrawl)?;
        let fetcher = Arc::new(Fetcher::new(client.clone(), &config.firecrawl));
        let scheduler = Scheduler::new(&config.batch);
        let summarizer = Summarizer::new(
            OpenAiClient::new(&config.llm)?,
            &config.llm,
            &config.summary,
        );

        Ok(Self {
            config,
            client,
            fetcher,
            scheduler,
            summarizer,
        })
    }

    /// Maps the site and returns the URLs a run would scrape
    pub async fn plan(&self) -> Result<Vec<String>, LlmsError> {
        let urls = map_site(&self.client, &self.config.site).await;
        if urls.is_empty() {
            return Err(LlmsError::NoUrls {
                site: self.config.site.base_url.clone(),
            });
        }
        Ok(urls)
    }

    /// Runs the full pipeline and writes the index files
    pub async fn run(&self) -> Result<RunStatistics, LlmsError> {
        let start_time = Instant::now();
        tracing::info!(
            "Generating llms.txt for {} (model {})",
            self.config.site.base_url,
            self.summarizer.model_name()
        );

        let urls = self.plan().await?;

        tracing::info!(
            "Scraping {} URLs in {} batches",
            urls.len(),
            self.scheduler.batch_count(urls.len())
        );
        let mut pages = self.scheduler.run(Arc::clone(&self.fetcher), &urls).await;

        let mut stats = RunStatistics::from_pages(&pages);
        tracing::info!(
            "Scraped {} pages ({} failed, {} empty)",
            stats.pages_scraped,
            stats.pages_failed,
            stats.pages_empty
        );

        self.summarize_pages(&mut pages, &mut stats).await;

        let header = IndexHeader::new(&self.config.site.base_url, Utc::now());
        let written = write_index_files(&pages, &header, &self.config.output)?;

        tracing::info!(
            "Wrote {} ({} bytes, {} pages)",
            written.index_path.display(),
            written.index_bytes,
            written.pages_written
        );
        stats.written.push((written.index_path, written.index_bytes));
        if let Some(full_path) = written.full_path {
            tracing::info!("Wrote {} ({} bytes)", full_path.display(), written.full_bytes);
            stats.written.push((full_path, written.full_bytes));
        }

        stats.elapsed = start_time.elapsed();
        Ok(stats)
    }

    /// Summarizes successful pages sequentially, in crawl order
    async fn summarize_pages(&self, pages: &mut [PageResult], stats: &mut RunStatistics) {
        let total = pages.iter().filter(|p| p.success).count();

        for (done, page) in pages.iter_mut().filter(|p| p.success).enumerate() {
            let source = self.summarizer.summarize_page(page).await;
            stats.record_summary(source);
            tracing::debug!(
                "[{}/{}] {} -> {:?} summary",
                done + 1,
                total,
                page.url,
                source
            );
        }
    }
}

/// Runs a complete generation with the given configuration
///
/// # Example
///
/// ```no_run
/// use llmstxt_gen::config::load_config;
/// use llmstxt_gen::crawler::run_generation;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("llmstxt.toml"))?;
/// let stats = run_generation(config).await?;
/// println!("{} pages published", stats.pages_published);
/// # Ok(())
/// # }
/// ```
pub async fn run_generation(config: Config) -> Result<RunStatistics, LlmsError> {
    Coordinator::new(config)?.run().await
}
