//! llms.txt and llms-full.txt rendering
//!
//! Both files list only publishable pages (scraped successfully with
//! non-blank content), in crawl order.

use crate::config::IndexFormat;
use crate::output::types::IndexHeader;
use crate::state::{excerpt, PageResult};

/// Renders the compact link index (`llms.txt`)
pub fn render_compact_index(
    pages: &[PageResult],
    format: IndexFormat,
    header: &IndexHeader,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    match format {
        IndexFormat::Links => {
            lines.push(format!("# {} llms.txt", header.base_url));
            lines.push(String::new());

            for page in publishable(pages) {
                let link = format!(
                    "- [{}]({})",
                    escape_link_text(page.display_title()),
                    page.url
                );
                match page.display_description() {
                    Some(description) => {
                        lines.push(format!("{}: {}", link, single_line(description)))
                    }
                    None => lines.push(link),
                }
            }
        }
        IndexFormat::Sections => {
            lines.extend(section_header(
                header,
                "LLMs.txt",
                "Title, URL, Description",
                count_publishable(pages),
            ));

            for page in publishable(pages) {
                lines.push(format!("# {}", page.display_title()));
                lines.push(format!("URL: {}", page.url));
                if let Some(description) = page.display_description() {
                    lines.push(format!("Description: {}", single_line(description)));
                }
                lines.push(String::new());
            }
        }
    }

    finish(lines)
}

/// Renders the full-content dump (`llms-full.txt`)
///
/// Each page's content is cut to `max_content_chars` characters.
pub fn render_full_dump(
    pages: &[PageResult],
    format: IndexFormat,
    header: &IndexHeader,
    max_content_chars: usize,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    match format {
        IndexFormat::Links => {
            lines.push(format!("# {} llms-full.txt", header.base_url));
            lines.push(String::new());

            // Page numbers follow the crawl list, so gaps mark skipped pages.
            for (position, page) in pages.iter().enumerate() {
                if !page.is_publishable() {
                    continue;
                }
                lines.push(format!("<|page-{}-llmstxt|>", position + 1));
                lines.push(format!("URL: {}", page.url));
                if let Some(description) = page.display_description() {
                    lines.push(format!("Description: {}", single_line(description)));
                }
                lines.push(String::new());
                lines.push(excerpt(page.content.trim(), max_content_chars).to_string());
                lines.push(String::new());
                lines.push("---".to_string());
                lines.push(String::new());
            }
        }
        IndexFormat::Sections => {
            lines.extend(section_header(
                header,
                "LLMs Full Content",
                "Title, URL, Description, Content",
                count_publishable(pages),
            ));

            for page in publishable(pages) {
                lines.push(format!("# {}", page.display_title()));
                lines.push(format!("URL: {}", page.url));
                if let Some(description) = page.display_description() {
                    lines.push(format!("Description: {}", single_line(description)));
                }
                lines.push("Content:".to_string());
                lines.push(excerpt(page.content.trim(), max_content_chars).to_string());
                lines.push(String::new());
                lines.push("---".to_string());
                lines.push(String::new());
            }
        }
    }

    finish(lines)
}

fn publishable(pages: &[PageResult]) -> impl Iterator<Item = &PageResult> {
    pages.iter().filter(|page| page.is_publishable())
}

fn count_publishable(pages: &[PageResult]) -> usize {
    publishable(pages).count()
}

fn section_header(header: &IndexHeader, title: &str, layout: &str, total: usize) -> Vec<String> {
    vec![
        format!("# {} - {}", header.site_label, title),
        format!("# Generated: {}", header.generated_at.to_rfc3339()),
        format!("# Total Pages: {}", total),
        format!("# Format: {}", layout),
        String::new(),
    ]
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);
    text.push('\n');
    text
}

/// Collapses a multi-line summary onto one line
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
