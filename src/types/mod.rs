//! Core type system and domain definitions
//!
//! This module provides the central type definitions for repository search:
//! the validated search request with its closed sort and language variants,
//! the repository summary produced from each search hit, and the API token.

use serde::{Deserialize, Serialize};

pub mod credential;
pub mod repository;
pub mod search;

pub use credential::*;
pub use repository::*;
pub use search::*;

/// Output format options for rendered search results
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragment with one block per repository
    #[default]
    Html,
    /// Markdown list suitable for terminals and notes
    Markdown,
    /// Pretty-printed JSON array of repository summaries
    Json,
}
