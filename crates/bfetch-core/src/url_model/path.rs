//! Final path segment extraction.

/// Returns the last non-empty path segment of `url`, percent-encoding intact.
///
/// Parsed URLs use their path component only. Text that does not parse as a
/// URL falls back to whatever follows the last `/`, minus any query or fragment.
pub fn last_path_segment(url: &str) -> Option<String> {
    match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()?
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string),
        Err(_) => {
            let without_suffix = url.split(['?', '#']).next().unwrap_or("");
            without_suffix
                .rsplit('/')
                .find(|s| !s.is_empty())
                .map(str::to_string)
        }
    }
}
