//! Wire types for the REST search endpoint

use serde::Deserialize;

use crate::types::RepositorySummary;

/// Body of `GET /search/repositories`
#[derive(Debug, Deserialize)]
pub struct RepositorySearchResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Absent or `null` both mean no matches
    #[serde(default)]
    pub items: Option<Vec<RepositoryItem>>,
}

impl RepositorySearchResponse {
    pub fn into_items(self) -> Vec<RepositoryItem> {
        self.items.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct RepositoryItem {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

impl From<RepositoryItem> for RepositorySummary {
    fn from(item: RepositoryItem) -> Self {
        Self {
            name: item.name,
            url: item.html_url,
            description: item.description,
            stars: item.stargazers_count,
            forks: item.forks_count,
        }
    }
}

/// Error body GitHub sends with non-200 responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "id": 1,
                    "name": "repoA",
                    "full_name": "owner/repoA",
                    "html_url": "https://github.com/owner/repoA",
                    "description": null,
                    "stargazers_count": 5,
                    "forks_count": 0
                },
                {
                    "name": "repoB",
                    "html_url": "https://github.com/owner/repoB",
                    "description": "second",
                    "stargazers_count": 10,
                    "forks_count": 3
                }
            ]
        }"#;

        let response: RepositorySearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_count, Some(2));

        let summaries: Vec<RepositorySummary> =
            response.into_items().into_iter().map(Into::into).collect();
        assert_eq!(summaries[0].name, "repoA");
        assert_eq!(summaries[0].description, None);
        assert_eq!(summaries[1].description.as_deref(), Some("second"));
        assert_eq!(summaries[1].forks, 3);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let response: RepositorySearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_items().is_empty());
    }

    #[test]
    fn test_null_items_is_empty() {
        let body = r#"{"total_count": 0, "incomplete_results": false, "items": null}"#;
        let response: RepositorySearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_items().is_empty());
    }

    #[test]
    fn test_item_without_name_is_rejected() {
        let body = r#"{"items": [{"html_url": "x", "stargazers_count": 1, "forks_count": 1}]}"#;
        assert!(serde_json::from_str::<RepositorySearchResponse>(body).is_err());
    }
}
