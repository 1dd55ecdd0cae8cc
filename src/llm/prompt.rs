//! Prompt construction and response parsing for page summaries

use crate::config::SummaryStyle;
use crate::url::ContentKind;

/// System message for `Title:`/`Description:` summaries
pub const LABELED_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates concise summaries.";

/// System message for free-form summaries
pub const PROSE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates concise, informative summaries for LLM consumption.";

/// System message for a summary style
pub fn system_prompt(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Labeled => LABELED_SYSTEM_PROMPT,
        SummaryStyle::Prose => PROSE_SYSTEM_PROMPT,
    }
}

/// Builds the user prompt for a page
///
/// `excerpt` is expected to be already truncated.
pub fn build_prompt(style: SummaryStyle, kind: ContentKind, url: &str, excerpt: &str) -> String {
    match style {
        SummaryStyle::Labeled => {
            let noun = match kind {
                ContentKind::Blog => "blog post",
                ContentKind::Docs => "documentation page",
                ContentKind::Page => "webpage",
            };
            format!(
                "Given this {noun} content from {url}, generate:\n\
                 1. A title (3-4 words max)\n\
                 2. A description (9-10 words max)\n\
                 \n\
                 Content:\n\
                 {excerpt}\n\
                 \n\
                 Format your response as:\n\
                 Title: [title here]\n\
                 Description: [description here]"
            )
        }
        SummaryStyle::Prose => match kind {
            ContentKind::Blog => format!(
                "Summarize this blog post in 2-3 sentences, focusing on the key insights and value for readers: {excerpt}"
            ),
            ContentKind::Docs => format!(
                "Summarize this documentation page in 2-3 sentences, highlighting the main features or APIs: {excerpt}"
            ),
            ContentKind::Page => format!(
                "Summarize this page in 2-3 sentences, focusing on the key information: {excerpt}"
            ),
        },
    }
}

/// Labels found in a model response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSummary {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Extracts `Title:` and `Description:` lines from a response
///
/// Lines are trimmed before matching and the label is stripped; when a label
/// repeats, the last non-empty value wins. In prose style, when no
/// description label is present, the unlabeled lines form the description.
pub fn parse_summary(style: SummaryStyle, response: &str) -> ParsedSummary {
    let mut parsed = ParsedSummary::default();

    let mut unlabeled = Vec::new();

    for line in response.lines().map(str::trim) {
        if let Some(value) = strip_label(line, "Title:") {
            parsed.title = Some(value);
        } else if let Some(value) = strip_label(line, "Description:") {
            parsed.description = Some(value);
        } else if !line.starts_with("Title:") && !line.starts_with("Description:") {
            unlabeled.push(line);
        }
    }

    if style == SummaryStyle::Prose && parsed.description.is_none() {
        let rest = unlabeled.join("\n");
        let rest = rest.trim();
        if !rest.is_empty() {
            parsed.description = Some(rest.to_string());
        }
    }

    parsed
}

fn strip_label(line: &str, label: &str) -> Option<String> {
    line.strip_prefix(label)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
