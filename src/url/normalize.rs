use url::Url;

/// Base URL without a trailing slash
///
/// # Examples
///
/// ```
/// use llmstxt_gen::url::site_root;
///
/// assert_eq!(site_root("https://www.example.com/"), "https://www.example.com");
/// assert_eq!(site_root("https://example.com/app//"), "https://example.com/app");
/// ```
pub fn site_root(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Appends a path (`"/"`, `"/blog"`, ...) to a base URL
///
/// # Examples
///
/// ```
/// use llmstxt_gen::url::join_site_path;
///
/// assert_eq!(join_site_path("https://example.com/", "/"), "https://example.com/");
/// assert_eq!(join_site_path("https://example.com", "/blog"), "https://example.com/blog");
/// ```
pub fn join_site_path(base_url: &str, path: &str) -> String {
    format!("{}/{}", site_root(base_url), path.trim_start_matches('/'))
}

/// Human-facing site name used in index headers
///
/// Strips the scheme and a leading `www.`, capitalizing the first letter
/// (`https://www.sidetool.co` → `Sidetool.co`). Falls back to the input when
/// it does not parse.
pub fn site_label(base_url: &str) -> String {
    let host = Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| base_url.to_string());

    let host = host.strip_prefix("www.").unwrap_or(&host);

    let mut chars = host.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
