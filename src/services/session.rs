//! Search session state
//!
//! Holds the parameters of the current search and the last rendered result,
//! so a front end only has to display what the session exposes.

use crate::formatter::{HtmlContent, repository_results_html};
use crate::github::{RepositorySearchExecutor, SearchError};
use crate::types::{RepositorySummary, SearchRequest};

#[derive(Debug, Default)]
pub struct SearchSession {
    current_request: Option<SearchRequest>,
    last_results: Vec<RepositorySummary>,
    last_rendered: Option<HtmlContent>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one search and replace the session result in place.
    ///
    /// The previous result is cleared before the request is sent, so a failed
    /// search leaves the session without a rendered result.
    pub async fn run<E: RepositorySearchExecutor>(
        &mut self,
        executor: &E,
        request: SearchRequest,
    ) -> Result<&HtmlContent, SearchError> {
        self.last_rendered = None;
        self.last_results.clear();
        self.current_request = Some(request.clone());

        let repositories = executor.search_repositories(&request).await?;
        let rendered = repository_results_html(&repositories, request.sort());
        self.last_results = repositories;

        Ok(self.last_rendered.insert(rendered))
    }

    pub fn current_request(&self) -> Option<&SearchRequest> {
        self.current_request.as_ref()
    }

    pub fn last_results(&self) -> &[RepositorySummary] {
        &self.last_results
    }

    pub fn last_rendered(&self) -> Option<&HtmlContent> {
        self.last_rendered.as_ref()
    }
}
