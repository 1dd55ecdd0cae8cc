//! Language-model summaries
//!
//! This module contains:
//! - An OpenAI chat-completions client behind the `Completion` trait
//! - Prompt templates keyed by content kind and summary style
//! - The summarizer that decides each page's title and description

mod client;
mod prompt;
mod summarizer;

pub use client::{Completion, CompletionRequest, OpenAiClient};
pub use prompt::{build_prompt, parse_summary, system_prompt, ParsedSummary};
pub use summarizer::{
    Summarizer, Summary, SummarySource, MIN_CONTENT_CHARS, PLACEHOLDER_DESCRIPTION,
    PLACEHOLDER_TITLE,
};
