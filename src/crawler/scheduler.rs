//! Batch scheduler for scrape calls
//!
//! This module handles:
//! - Splitting the URL list into fixed-size batches
//! - Bounded fan-out within a batch via a semaphore
//! - A fixed pause between batches to throttle the scraping service
//! - Keeping results in input order regardless of completion order

use crate::config::BatchConfig;
use crate::crawler::fetcher::PageScraper;
use crate::state::PageResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Scheduler that scrapes URLs in throttled, bounded-width batches
///
/// With `batch_size = 1` and `concurrency = 1` this degenerates into a
/// sequential crawl with a pause between pages.
pub struct Scheduler {
    /// Limits scrape calls in flight across the pool
    semaphore: Arc<Semaphore>,

    batch_size: usize,

    batch_delay: Duration,
}

impl Scheduler {
    /// Creates a scheduler from batch settings
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay(),
        }
    }

    /// Number of batches needed for `url_count` URLs
    pub fn batch_count(&self, url_count: usize) -> usize {
        url_count.div_ceil(self.batch_size)
    }

    /// Scrapes every URL, returning one result per URL in input order
    ///
    /// `result[i]` always belongs to `urls[i]`.
    pub async fn run<S: PageScraper>(&self, scraper: Arc<S>, urls: &[String]) -> Vec<PageResult> {
        let total_batches = self.batch_count(urls.len());
        let mut results = Vec::with_capacity(urls.len());

        for (index, batch) in urls.chunks(self.batch_size).enumerate() {
            tracing::info!(
                "Processing batch {} of {} ({} URLs)",
                index + 1,
                total_batches,
                batch.len()
            );

            let batch_results = self.run_batch(&scraper, batch).await;
            let succeeded = batch_results.iter().filter(|r| r.success).count();
            tracing::debug!(
                "Batch {} finished: {}/{} scraped",
                index + 1,
                succeeded,
                batch.len()
            );
            results.extend(batch_results);

            if index + 1 < total_batches && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        results
    }

    /// Scrapes one batch concurrently
    async fn run_batch<S: PageScraper>(
        &self,
        scraper: &Arc<S>,
        batch: &[String],
    ) -> Vec<PageResult> {
        let handles: Vec<_> = batch
            .iter()
            .map(|url| {
                let scraper = Arc::clone(scraper);
                let semaphore = Arc::clone(&self.semaphore);
                let url = url.clone();
                tokio::spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => return PageResult::failed(url, "worker pool closed"),
                    };
                    scraper.scrape(&url).await
                })
            })
            .collect();

        // Handles are awaited in spawn order, which is input order.
        let joined = futures::future::join_all(handles).await;

        joined
            .into_iter()
            .zip(batch)
            .map(|(outcome, url)| match outcome {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Scrape worker for {} did not finish: {}", url, e);
                    PageResult::failed(url.clone(), format!("worker failed: {}", e))
                }
            })
            .collect()
    }
}
