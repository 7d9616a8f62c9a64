//! Repository summary produced from each search hit

use serde::{Deserialize, Serialize};

/// Shown when a repository has no description
pub const NO_DESCRIPTION: &str = "No description";

/// The subset of a repository's metadata needed for rendering.
///
/// Created fresh per response item and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
}

impl RepositorySummary {
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}
