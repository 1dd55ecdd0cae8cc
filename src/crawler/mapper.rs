//! Site mapping
//!
//! Produces the ordered URL list for a run. Mapping never fails the run: when
//! Firecrawl cannot be reached or answers badly, a fixed list of common
//! top-level pages is used instead.

use crate::config::SiteConfig;
use crate::crawler::firecrawl::FirecrawlClient;
use crate::url::{join_site_path, prioritize};

/// Paths tried when the site cannot be mapped
pub const FALLBACK_PATHS: &[&str] = &[
    "/",
    "/blog",
    "/features",
    "/pricing",
    "/docs",
    "/about",
    "/integrations",
    "/security",
    "/support",
    "/api",
];

/// Fallback URL list for a site, capped at `max_urls`
///
/// # Example
///
/// ```
/// use llmstxt_gen::crawler::fallback_urls;
///
/// let urls = fallback_urls("https://example.com/", 3);
/// assert_eq!(urls, vec![
///     "https://example.com/",
///     "https://example.com/blog",
///     "https://example.com/features",
/// ]);
/// ```
pub fn fallback_urls(base_url: &str, max_urls: usize) -> Vec<String> {
    FALLBACK_PATHS
        .iter()
        .take(max_urls)
        .map(|path| join_site_path(base_url, path))
        .collect()
}

/// Maps the configured site into an ordered URL list
///
/// Focus-path URLs come first when prioritization is enabled; the list is then
/// capped at `max_urls`. An empty list means the service answered but found
/// nothing.
pub async fn map_site(client: &FirecrawlClient, site: &SiteConfig) -> Vec<String> {
    tracing::info!("Mapping {} (limit {})", site.base_url, site.max_urls);

    match client
        .map(&site.base_url, site.max_urls, site.include_sitemap)
        .await
    {
        Ok(urls) => {
            let total = urls.len();
            let ordered = order_urls(urls, site);
            let focused = ordered
                .iter()
                .filter(|url| crate::url::matches_focus_path(url, &site.focus_paths))
                .count();
            tracing::info!(
                "Found {} URLs ({} matching focus paths), keeping {}",
                total,
                focused,
                ordered.len()
            );
            ordered
        }
        Err(e) => {
            tracing::warn!("Mapping failed, using fallback URLs: {}", e);
            fallback_urls(&site.base_url, site.max_urls)
        }
    }
}

/// Applies prioritization and the URL cap
pub fn order_urls(urls: Vec<String>, site: &SiteConfig) -> Vec<String> {
    let mut urls = if site.prioritize {
        prioritize(urls, &site.focus_paths)
    } else {
        urls
    };
    urls.truncate(site.max_urls);
    urls
}
