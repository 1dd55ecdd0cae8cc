//! Title extraction for scraped pages
//!
//! Firecrawl usually reports a title in the page metadata. When it does not,
//! the title is recovered from:
//! - the `<title>` element (or `og:title`) of the returned HTML
//! - the first level-one heading of the markdown

use scraper::{Html, Selector};

/// Extracts the page title from an HTML document
///
/// # Example
///
/// ```
/// use llmstxt_gen::crawler::extract_html_title;
///
/// let html = r#"<html><head><title> Pricing </title></head><body></body></html>"#;
/// assert_eq!(extract_html_title(html), Some("Pricing".to_string()));
/// ```
pub fn extract_html_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    title_element(&document).or_else(|| og_title(&document))
}

fn title_element(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn og_title(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:title"][content]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
}

/// Returns the text of the first `# ` heading in a markdown document
pub fn first_markdown_heading(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().trim_end_matches('#').trim().to_string())
        .filter(|s| !s.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        assert_eq!(extract_html_title(html), Some("Test Page".to_string()));
    }

    #[test]
    fn test_title_whitespace_is_collapsed() {
        let html = "<html><head><title>\n  Multi\n  Line  </title></head></html>";
        assert_eq!(extract_html_title(html), Some("Multi Line".to_string()));
    }

    #[test]
    fn test_og_title_fallback() {
        let html = r#"<html><head><meta property="og:title" content="Open Graph"></head></html>"#;
        assert_eq!(extract_html_title(html), Some("Open Graph".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body><p>Hi</p></body></html>"#;
        assert_eq!(extract_html_title(html), None);

        let html = r#"<html><head><title>   </title></head></html>"#;
        assert_eq!(extract_html_title(html), None);
    }

    #[test]
    fn test_first_markdown_heading() {
        let md = "Intro text\n\n## Not this\n# The Title\n\n# Later";
        assert_eq!(first_markdown_heading(md), Some("The Title".to_string()));

        assert_eq!(
            first_markdown_heading("# Closed Heading #"),
            Some("Closed Heading".to_string())
        );
        assert_eq!(first_markdown_heading("#hashtag\nplain"), None);
        assert_eq!(first_markdown_heading(""), None);
    }
}
