//! URL handling module for llmstxt-gen
//!
//! This module provides page classification by path, focus-path
//! prioritization of mapped URLs, and base-URL helpers.

mod normalize;

// Re-export main functions
pub use normalize::{join_site_path, site_label, site_root};

/// Kind of content a page holds, judged from its URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Blog posts (`/blog` in the path)
    Blog,
    /// Documentation (`/docs` in the path)
    Docs,
    /// Anything else
    Page,
}

impl ContentKind {
    /// Classifies a URL
    ///
    /// `/blog` takes precedence over `/docs` when both appear.
    ///
    /// # Examples
    ///
    /// ```
    /// use llmstxt_gen::url::ContentKind;
    ///
    /// assert_eq!(ContentKind::of("https://example.com/blog/launch"), ContentKind::Blog);
    /// assert_eq!(ContentKind::of("https://example.com/docs/api"), ContentKind::Docs);
    /// assert_eq!(ContentKind::of("https://example.com/pricing"), ContentKind::Page);
    /// ```
    pub fn of(url: &str) -> Self {
        let path = url_path(url);
        if path.contains("/blog") {
            Self::Blog
        } else if path.contains("/docs") {
            Self::Docs
        } else {
            Self::Page
        }
    }
}

/// Returns true if the URL's path contains any of the focus paths
pub fn matches_focus_path(url: &str, focus_paths: &[String]) -> bool {
    let path = url_path(url);
    focus_paths.iter().any(|focus| path.contains(focus.as_str()))
}

/// Moves focus-path URLs to the front, keeping relative order in both groups
///
/// This is a stable partition: applying it twice gives the same list, and the
/// output is a permutation of the input.
///
/// # Examples
///
/// ```
/// use llmstxt_gen::url::prioritize;
///
/// let urls = vec![
///     "https://x.com/".to_string(),
///     "https://x.com/blog/a".to_string(),
///     "https://x.com/pricing".to_string(),
///     "https://x.com/blog/b".to_string(),
/// ];
/// let ordered = prioritize(urls, &["/blog".to_string()]);
/// assert_eq!(ordered[0], "https://x.com/blog/a");
/// assert_eq!(ordered[1], "https://x.com/blog/b");
/// assert_eq!(ordered[2], "https://x.com/");
/// ```
pub fn prioritize(urls: Vec<String>, focus_paths: &[String]) -> Vec<String> {
    let (mut focused, rest): (Vec<String>, Vec<String>) = urls
        .into_iter()
        .partition(|url| matches_focus_path(url, focus_paths));
    focused.extend(rest);
    focused
}

/// Path component of a URL, or the raw string when it does not parse
///
/// Mapped URLs are usually absolute, but the check stays meaningful for
/// relative entries too.
fn url_path(url: &str) -> std::borrow::Cow<'_, str> {
    match ::url::Url::parse(url) {
        Ok(parsed) => std::borrow::Cow::Owned(parsed.path().to_string()),
        Err(_) => std::borrow::Cow::Borrowed(url),
    }
}
