pub mod repository;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub use repository::*;

/// Descriptions longer than this many characters are cut
pub const DESCRIPTION_LIMIT: usize = 100;

/// Rendered in place of the result list when a search has no hits
pub const NO_RESULTS_HTML: &str =
    "<p style='color: red;'>No results found for the given search criteria.</p>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlContent(pub String);

impl HtmlContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HtmlContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keep the first `DESCRIPTION_LIMIT` characters and append `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_description(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((byte_index, _)) => Cow::Owned(format!("{}...", &description[..byte_index])),
        None => Cow::Borrowed(description),
    }
}

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_is_verbatim() {
        let exact = "x".repeat(DESCRIPTION_LIMIT);
        assert_eq!(truncate_description(&exact), exact.as_str());
        assert_eq!(truncate_description("short"), "short");
        assert_eq!(truncate_description(""), "");
    }

    #[test]
    fn test_long_description_is_cut() {
        let long = "abcdefghij".repeat(15);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(truncated.ends_with("..."));
        assert_eq!(&truncated[..DESCRIPTION_LIMIT], &long[..DESCRIPTION_LIMIT]);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let long = "日本語".repeat(40);
        let truncated = truncate_description(&long);
        let expected: String = long.chars().take(DESCRIPTION_LIMIT).collect();
        assert_eq!(truncated, format!("{}...", expected));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html("<script>alert('x & y')</script>"),
            "&lt;script&gt;alert(&#39;x &amp; y&#39;)&lt;/script&gt;"
        );
    }
}
