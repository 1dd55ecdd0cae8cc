//! Run statistics
//!
//! Counters gathered while a run progresses, printed once at the end.

use crate::llm::SummarySource;
use crate::state::PageResult;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one generation run
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// URLs returned by the mapper (after prioritizing and capping)
    pub urls_mapped: usize,

    /// Pages scraped with a successful response
    pub pages_scraped: usize,

    /// Pages that failed after all attempts
    pub pages_failed: usize,

    /// Successful pages with blank content
    pub pages_empty: usize,

    /// Pages listed in llms.txt
    pub pages_published: usize,

    /// How each summary was obtained
    pub summaries_by_source: HashMap<SummarySource, usize>,

    /// Failed URLs with their last error
    pub failures: Vec<(String, String)>,

    /// Files written, with their size in bytes
    pub written: Vec<(PathBuf, usize)>,

    pub elapsed: Duration,
}

impl RunStatistics {
    /// Tallies scrape outcomes for a finished crawl
    pub fn from_pages(pages: &[PageResult]) -> Self {
        let mut stats = Self {
            urls_mapped: pages.len(),
            ..Default::default()
        };

        for page in pages {
            if !page.success {
                stats.pages_failed += 1;
                stats.failures.push((
                    page.url.clone(),
                    page.error.clone().unwrap_or_else(|| "unknown error".to_string()),
                ));
            } else if page.is_publishable() {
                stats.pages_scraped += 1;
                stats.pages_published += 1;
            } else {
                stats.pages_scraped += 1;
                stats.pages_empty += 1;
            }
        }

        stats
    }

    pub fn record_summary(&mut self, source: SummarySource) {
        *self.summaries_by_source.entry(source).or_insert(0) += 1;
    }

    pub fn summary_count(&self, source: SummarySource) -> usize {
        self.summaries_by_source.get(&source).copied().unwrap_or(0)
    }

    /// Fraction of mapped URLs that made it into the index, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.urls_mapped == 0 {
            0.0
        } else {
            (self.pages_published as f64 / self.urls_mapped as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== llms.txt Generation ===\n");

    println!("Pages:");
    println!("  URLs mapped: {}", stats.urls_mapped);
    println!("  Scraped: {}", stats.pages_scraped);
    println!("  Failed: {}", stats.pages_failed);
    println!("  Empty: {}", stats.pages_empty);
    println!();

    println!("Summaries:");
    for source in [
        SummarySource::Generated,
        SummarySource::Metadata,
        SummarySource::Placeholder,
        SummarySource::Fallback,
    ] {
        println!("  {:?}: {}", source, stats.summary_count(source));
    }
    println!();

    if !stats.failures.is_empty() {
        println!("Failures ({}):", stats.failures.len());
        for (url, error) in &stats.failures {
            println!("  - {}: {}", url, error);
        }
        println!();
    }

    for (path, bytes) in &stats.written {
        println!("Wrote {} ({} bytes)", path.display(), bytes);
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages published) in {:.1}s",
        stats.success_rate(),
        stats.pages_published,
        stats.urls_mapped,
        stats.elapsed.as_secs_f64()
    );
}
