use crate::github::error::SearchError;
use crate::github::rest_types::{ApiErrorBody, RepositorySearchResponse};
use crate::types::{ApiToken, RepositorySummary, SearchRequest};

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tokio::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Public GitHub REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Applied when no request timeout is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page where users create personal access tokens
pub const TOKEN_SETTINGS_URL: &str = "https://github.com/settings/tokens";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub trait RepositorySearchExecutor {
    #[allow(async_fn_in_trait)]
    async fn search_repositories(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RepositorySummary>, SearchError>;
}

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: ApiToken,
    base_url: Url,
}

impl GitHubClient {
    /// Creates a client for the public GitHub API.
    ///
    /// Fails with `SearchError::MissingToken` when the token is empty, so an
    /// unauthenticated search never reaches the network.
    pub fn new(token: ApiToken, timeout: Option<Duration>) -> Result<Self, SearchError> {
        Self::with_base_url(token, timeout, DEFAULT_API_BASE_URL)
    }

    /// Creates a client against another API root, e.g. a GitHub Enterprise
    /// host or a local test server.
    pub fn with_base_url(
        token: ApiToken,
        timeout: Option<Duration>,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        if token.is_empty() {
            return Err(SearchError::MissingToken);
        }

        let base_url = Url::parse(base_url)?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    /// Full search URL for a request
    pub fn search_url(&self, request: &SearchRequest) -> String {
        format!(
            "{}/search/repositories?{}",
            self.base_url.as_str().trim_end_matches('/'),
            request.query_string()
        )
    }
}

impl RepositorySearchExecutor for GitHubClient {
    /// Issues a single `GET /search/repositories` and converts the hits.
    ///
    /// Only the first page (100 results) is fetched. There is no retry: a
    /// non-200 status is returned as `SearchError::Status` straight away.
    async fn search_repositories(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RepositorySummary>, SearchError> {
        let url = self.search_url(request);
        info!(
            "Searching repositories for '{}' sorted by {}",
            request.query_term(),
            request.sort()
        );

        let start_time = std::time::Instant::now();

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("token {}", self.token.as_str()))
            .send()
            .await
            .map_err(|e| {
                error!("Repository search request failed: {}", e);
                SearchError::Network(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .map(|b| b.message);
            error!(
                "Repository search returned status {}: {}",
                status.as_u16(),
                message.as_deref().unwrap_or("no message")
            );
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: RepositorySearchResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse repository search response: {}", e);
            SearchError::MalformedResponse(e)
        })?;

        debug!(
            "Search matched {} repositories in total",
            parsed.total_count.unwrap_or_default()
        );
        let items = parsed.into_items();
        info!(
            "Repository search returned {} items in {:?}",
            items.len(),
            start_time.elapsed()
        );

        Ok(items.into_iter().map(RepositorySummary::from).collect())
    }
}
