//! Per-page results flowing from the scraper to the index writer

/// Author-supplied metadata returned alongside a scraped page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// `<title>` or og:title as reported by the scraper
    pub title: Option<String>,

    /// `<meta name="description">` as reported by the scraper
    pub description: Option<String>,
}

impl PageMetadata {
    /// Metadata title, ignoring blank values
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Metadata description, ignoring blank values
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

/// Outcome of scraping one URL
///
/// Created once per input URL. The summarizer fills in `title` and
/// `description` exactly once via [`PageResult::attach_summary`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub url: String,

    /// Markdown content; empty on failure
    pub content: String,

    pub success: bool,

    /// Last error seen while scraping
    pub error: Option<String>,

    pub metadata: PageMetadata,

    /// Final title for the index files
    pub title: Option<String>,

    /// Final description for the index files
    pub description: Option<String>,
}

impl PageResult {
    /// A successfully scraped page
    pub fn scraped(url: impl Into<String>, content: String, metadata: PageMetadata) -> Self {
        Self {
            url: url.into(),
            content,
            success: true,
            error: None,
            metadata,
            title: None,
            description: None,
        }
    }

    /// A page that could not be scraped
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: String::new(),
            success: false,
            error: Some(error.into()),
            metadata: PageMetadata::default(),
            title: None,
            description: None,
        }
    }

    /// Whether the page belongs in the index files
    ///
    /// Pages that were scraped but came back blank are left out.
    pub fn is_publishable(&self) -> bool {
        self.success && !self.content.trim().is_empty()
    }

    /// Records the final title and description
    pub fn attach_summary(&mut self, title: String, description: String) {
        debug_assert!(self.title.is_none() && self.description.is_none());
        self.title = Some(title);
        self.description = Some(description);
    }

    /// Title to print, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref())
            .or_else(|| self.metadata.title())
            .unwrap_or("Untitled")
    }

    /// Description to print, if any
    pub fn display_description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

/// First `max_chars` characters of `text`, never splitting a character
///
/// # Example
///
/// ```
/// use llmstxt_gen::state::excerpt;
///
/// assert_eq!(excerpt("héllo", 2), "hé");
/// assert_eq!(excerpt("hi", 10), "hi");
/// ```
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
