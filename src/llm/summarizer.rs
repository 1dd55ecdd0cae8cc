//! Page summarizer
//!
//! Turns scraped page content into the title and description shown in the
//! index files. Summarizing never fails: short content gets a placeholder and
//! any API or parsing problem gets the style's fallback text.

use crate::config::{LlmConfig, SummaryConfig, SummaryStyle};
use crate::llm::client::{Completion, CompletionRequest};
use crate::llm::prompt::{build_prompt, parse_summary, system_prompt};
use crate::state::{excerpt, PageResult};
use crate::url::ContentKind;

/// Content shorter than this (after trimming) is not sent to the model
pub const MIN_CONTENT_CHARS: usize = 10;

/// Title used for placeholders and labeled-style fallbacks
pub const PLACEHOLDER_TITLE: &str = "Page";

/// Description used when there is nothing to summarize
pub const PLACEHOLDER_DESCRIPTION: &str = "Content not available";

/// Where a summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummarySource {
    /// Produced by the model
    Generated,
    /// Taken from the page's own metadata
    Metadata,
    /// Content too short to summarize
    Placeholder,
    /// The model call or its response failed
    Fallback,
}

/// Title and description for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Present when the model (or placeholder) supplied one
    pub title: Option<String>,
    pub description: String,
    pub source: SummarySource,
}

impl Summary {
    fn placeholder() -> Self {
        Self {
            title: Some(PLACEHOLDER_TITLE.to_string()),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            source: SummarySource::Placeholder,
        }
    }

    fn fallback(style: SummaryStyle) -> Self {
        match style {
            SummaryStyle::Labeled => Self {
                title: Some(PLACEHOLDER_TITLE.to_string()),
                description: "Content summary".to_string(),
                source: SummarySource::Fallback,
            },
            SummaryStyle::Prose => Self {
                title: None,
                description: "Content available at this URL.".to_string(),
                source: SummarySource::Fallback,
            },
        }
    }
}

/// Summarizes pages through a completion client
pub struct Summarizer<C> {
    client: C,
    style: SummaryStyle,
    max_tokens: u32,
    temperature: f32,
    max_input_chars: usize,
    prefer_metadata: bool,
}

impl<C: Completion> Summarizer<C> {
    /// Creates a summarizer from validated configuration
    pub fn new(client: C, llm: &LlmConfig, summary: &SummaryConfig) -> Self {
        Self {
            client,
            style: summary.style,
            max_tokens: llm
                .max_tokens
                .unwrap_or_else(|| summary.style.default_max_tokens()),
            temperature: llm.temperature,
            max_input_chars: summary.max_input_chars,
            prefer_metadata: summary.prefer_metadata,
        }
    }

    /// Summarizes raw page content
    pub async fn summarize(&self, url: &str, content: &str) -> Summary {
        if content.trim().chars().count() < MIN_CONTENT_CHARS {
            tracing::debug!("Content of {} too short to summarize", url);
            return Summary::placeholder();
        }

        let request = CompletionRequest {
            system: system_prompt(self.style).to_string(),
            prompt: build_prompt(
                self.style,
                ContentKind::of(url),
                url,
                excerpt(content, self.max_input_chars),
            ),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = match self.client.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Error generating summary for {}: {}", url, e);
                return Summary::fallback(self.style);
            }
        };

        let parsed = parse_summary(self.style, &response);
        let fallback = Summary::fallback(self.style);

        match (parsed.title, parsed.description) {
            (None, None) => {
                tracing::warn!("Unusable summary for {}: {:?}", url, response);
                fallback
            }
            (title, description) => Summary {
                title,
                description: description.unwrap_or(fallback.description),
                source: SummarySource::Generated,
            },
        }
    }

    /// Decides and attaches the final title and description of a page
    ///
    /// A non-blank meta description is used as-is when `prefer-metadata` is
    /// on, skipping the model. Titles come from the page metadata first,
    /// then the model, then a placeholder.
    pub async fn summarize_page(&self, page: &mut PageResult) -> SummarySource {
        let summary = match page.metadata.description() {
            Some(description) if self.prefer_metadata => Summary {
                title: None,
                description: description.to_string(),
                source: SummarySource::Metadata,
            },
            _ => self.summarize(&page.url, &page.content).await,
        };

        let title = page
            .metadata
            .title()
            .map(str::to_string)
            .or(summary.title)
            .unwrap_or_else(|| self.fallback_title().to_string());

        page.attach_summary(title, summary.description);
        summary.source
    }

    fn fallback_title(&self) -> &'static str {
        match self.style {
            SummaryStyle::Labeled => PLACEHOLDER_TITLE,
            SummaryStyle::Prose => "Untitled",
        }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}
