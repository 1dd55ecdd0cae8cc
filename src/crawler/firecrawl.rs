//! Firecrawl API client
//!
//! Wraps the two Firecrawl endpoints the generator uses:
//! - `POST /v1/map` to discover a site's URLs
//! - `POST /v1/scrape` to fetch one page as markdown plus metadata
//!
//! Firecrawl has answered with several response shapes over time. Each one is
//! normalized here into [`ScrapedDocument`] or a plain URL list, so nothing
//! past this module inspects raw JSON.

use crate::config::FirecrawlConfig;
use crate::LlmsError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use thiserror::Error;

/// User agent sent to both external services
pub const USER_AGENT: &str = concat!("llmstxt-gen/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with the given request timeout
///
/// # Example
///
/// ```no_run
/// use llmstxt_gen::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Why a single scrape attempt failed
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("scrape rejected: {0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Canonical result of one scrape call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapedDocument {
    #[serde(default)]
    pub markdown: Option<String>,

    #[serde(default)]
    pub html: Option<String>,

    #[serde(default)]
    pub metadata: ScrapeMetadata,
}

/// Page metadata reported by Firecrawl
///
/// Firecrawl copies `<meta>` tags verbatim, so repeated tags arrive as arrays;
/// the first value is kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeMetadata {
    #[serde(default, deserialize_with = "string_or_first")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "string_or_first")]
    pub description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapRequest<'a> {
    url: &'a str,
    search: &'a str,
    limit: usize,
    ignore_sitemap: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 2],
    only_main_content: bool,
    wait_for: u64,
}

/// Map responses seen in the wild
#[derive(Deserialize)]
#[serde(untagged)]
enum MapResponse {
    Links { links: Vec<MapLink> },
    Nested { data: MapData },
    List(Vec<MapLink>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MapData {
    Urls { urls: Vec<MapLink> },
    Links { links: Vec<MapLink> },
    List(Vec<MapLink>),
}

/// A mapped link: a bare URL or an object carrying one
#[derive(Deserialize)]
#[serde(untagged)]
enum MapLink {
    Url(String),
    Entry { url: String },
}

impl MapResponse {
    fn into_urls(self) -> Vec<String> {
        let links = match self {
            MapResponse::Links { links } => links,
            MapResponse::List(links) => links,
            MapResponse::Nested { data } => match data {
                MapData::Urls { urls } => urls,
                MapData::Links { links } => links,
                MapData::List(links) => links,
            },
        };

        links
            .into_iter()
            .map(|link| match link {
                MapLink::Url(url) => url,
                MapLink::Entry { url } => url,
            })
            .collect()
    }
}

/// Scrape responses: `{"success", "data": {...}}` or a bare document
#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<ScrapedDocument>,
    #[serde(flatten)]
    document: ScrapedDocument,
}

impl ScrapeResponse {
    fn into_document(self) -> Result<ScrapedDocument, AttemptError> {
        if self.success == Some(false) {
            return Err(AttemptError::Rejected(
                self.error.unwrap_or_else(|| "success=false".to_string()),
            ));
        }
        Ok(self.data.unwrap_or(self.document))
    }
}

/// Client for the Firecrawl v1 API
#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    api_base: String,
    api_key: String,
    wait_for: u64,
}

impl FirecrawlClient {
    /// Creates a client from validated configuration
    pub fn new(config: &FirecrawlConfig) -> Result<Self, LlmsError> {
        let client = build_http_client(config.request_timeout())?;
        let api_key = config
            .api_key
            .clone()
            .ok_or(crate::ConfigError::MissingCredential("FIRECRAWL_API_KEY"))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            wait_for: config.wait_for,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_base, path)
    }

    /// Lists URLs of a site
    ///
    /// Returns an error on transport failure, non-200 status or an
    /// unrecognized body; callers decide how to degrade.
    pub async fn map(
        &self,
        site_url: &str,
        limit: usize,
        include_sitemap: bool,
    ) -> Result<Vec<String>, LlmsError> {
        let endpoint = self.endpoint("map");
        let request = MapRequest {
            url: site_url,
            search: "",
            limit,
            ignore_sitemap: !include_sitemap,
        };

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| LlmsError::Http {
                url: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LlmsError::Api {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body: MapResponse = response.json().await.map_err(|e| LlmsError::Decode {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;

        Ok(body.into_urls())
    }

    /// Performs one scrape attempt for `url`
    pub async fn scrape(&self, url: &str) -> Result<ScrapedDocument, AttemptError> {
        let request = ScrapeRequest {
            url,
            formats: ["markdown", "html"],
            only_main_content: true,
            wait_for: self.wait_for,
        };

        let response = self
            .client
            .post(self.endpoint("scrape"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(AttemptError::RateLimited),
            other => return Err(AttemptError::Status(other.as_u16())),
        }

        let body: ScrapeResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::Timeout
            } else {
                AttemptError::Decode(e.to_string())
            }
        })?;

        body.into_document()
    }
}

fn classify_transport_error(e: reqwest::Error) -> AttemptError {
    if e.is_timeout() {
        AttemptError::Timeout
    } else {
        AttemptError::Transport(e.to_string())
    }
}

fn string_or_first<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Other(serde_json::Value),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => Some(s),
        Some(OneOrMany::Many(v)) => v.into_iter().next(),
        Some(OneOrMany::Other(_)) | None => None,
    })
}
