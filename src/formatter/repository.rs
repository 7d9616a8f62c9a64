use crate::formatter::{HtmlContent, NO_RESULTS_HTML, escape_html, truncate_description};
use crate::types::{RepositorySummary, SortMode};

const LINK_COLOR: &str = "#6200EE";

/// Decorative label shown under each result, chosen by sort mode
pub fn sort_label(repository: &RepositorySummary, sort: SortMode) -> String {
    match sort {
        SortMode::Stars => format!("⭐ {} stars", repository.stars),
        SortMode::Forks => format!("🍴 {} forks", repository.forks),
        SortMode::BestMatch | SortMode::RecentlyUpdated => format!("🔍 {}", repository.name),
    }
}

/// One repository as `<b>name</b> - <a href='url'>url</a>`, then the sort label
/// and description on their own lines.
///
/// Name, URL, label and description are HTML-escaped; the description is
/// truncated first so the limit counts source characters. Text without markup
/// characters comes through unchanged.
pub fn repository_block_html(repository: &RepositorySummary, sort: SortMode) -> String {
    let name = escape_html(&repository.name);
    let url = escape_html(&repository.url);
    let description = truncate_description(repository.description_or_default());

    format!(
        "<b>{name}</b> - <a href='{url}' style='color: {LINK_COLOR};'>{url}</a><br><br>{label}<br>{description}<br><br>",
        label = escape_html(&sort_label(repository, sort)),
        description = escape_html(&description),
    )
}

/// Render search results as one HTML fragment, in response order.
///
/// An empty list renders the fixed no-results message, never an empty string.
pub fn repository_results_html(repositories: &[RepositorySummary], sort: SortMode) -> HtmlContent {
    if repositories.is_empty() {
        return HtmlContent(NO_RESULTS_HTML.to_string());
    }

    let content = repositories
        .iter()
        .map(|repository| repository_block_html(repository, sort))
        .collect::<String>();

    HtmlContent(content)
}

pub fn repository_results_markdown(repositories: &[RepositorySummary], sort: SortMode) -> String {
    if repositories.is_empty() {
        return "No results found for the given search criteria.\n".to_string();
    }

    let mut content = String::new();
    for repository in repositories {
        content.push_str(&format!("**{}** - <{}>\n", repository.name, repository.url));
        content.push_str(&format!("{}\n", sort_label(repository, sort)));
        content.push_str(&format!(
            "{}\n\n",
            truncate_description(repository.description_or_default())
        ));
    }
    content
}

/// Wrap a rendered fragment into a standalone page
pub fn html_document(content: &HtmlContent, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        content
    )
}
