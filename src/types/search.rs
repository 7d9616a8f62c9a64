//! Search request types
//!
//! Sort mode and language filter are closed variants so that only valid
//! combinations reach the query builder. The language filter keeps a
//! `Custom` variant for values outside the built-in list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::github::error::SearchError;

/// Fixed page size requested from the search endpoint
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Free-text keywords entered by the user.
///
/// Always trimmed and never empty; deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct SearchKeywords(String);

impl SearchKeywords {
    pub fn parse<T: Into<String>>(keywords: T) -> Result<Self, SearchError> {
        let keywords = keywords.into().trim().to_string();
        if keywords.is_empty() {
            return Err(SearchError::EmptyKeywords);
        }
        Ok(Self(keywords))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SearchKeywords {
    type Error = SearchError;

    fn try_from(keywords: String) -> Result<Self, Self::Error> {
        Self::parse(keywords)
    }
}

impl std::fmt::Display for SearchKeywords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side ordering requested for search results
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum SortMode {
    #[default]
    #[strum(to_string = "Best Match", serialize = "bestmatch")]
    BestMatch,
    #[strum(to_string = "Stars", serialize = "stars")]
    Stars,
    #[strum(to_string = "Forks", serialize = "forks")]
    Forks,
    #[strum(
        to_string = "Recently Updated",
        serialize = "recentlyupdated",
        serialize = "updated"
    )]
    RecentlyUpdated,
}

impl SortMode {
    /// Parse a display name or API token, ignoring case, spaces, `-` and `_`
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        Self::from_str(&normalized).ok()
    }

    /// Lowercase token sent as the `sort` parameter.
    ///
    /// The search endpoint ignores unknown sort values and falls back to best
    /// match, so `bestmatch` is sent as-is.
    pub fn api_token(&self) -> &'static str {
        match self {
            SortMode::BestMatch => "bestmatch",
            SortMode::Stars => "stars",
            SortMode::Forks => "forks",
            SortMode::RecentlyUpdated => "updated",
        }
    }
}

/// Language restriction appended to the query as `language:<value>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageFilter {
    #[default]
    All,
    Python,
    JavaScript,
    Java,
    Cpp,
    Go,
    Custom(String),
}

impl LanguageFilter {
    /// Built-in choices in display order
    pub const BUILT_IN: [LanguageFilter; 6] = [
        LanguageFilter::All,
        LanguageFilter::Python,
        LanguageFilter::JavaScript,
        LanguageFilter::Java,
        LanguageFilter::Cpp,
        LanguageFilter::Go,
    ];

    /// Parse user input. Empty input and `all` mean no filter; anything that is
    /// not a built-in language becomes `Custom`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return LanguageFilter::All;
        }
        if value.eq_ignore_ascii_case("cpp") {
            return LanguageFilter::Cpp;
        }

        Self::BUILT_IN
            .into_iter()
            .find(|language| {
                language
                    .query_value()
                    .is_some_and(|known| known.eq_ignore_ascii_case(value))
            })
            .unwrap_or_else(|| LanguageFilter::Custom(value.to_string()))
    }

    /// Value placed after `language:`, or `None` when no clause is emitted
    pub fn query_value(&self) -> Option<&str> {
        match self {
            LanguageFilter::All => None,
            LanguageFilter::Python => Some("Python"),
            LanguageFilter::JavaScript => Some("JavaScript"),
            LanguageFilter::Java => Some("Java"),
            LanguageFilter::Cpp => Some("C++"),
            LanguageFilter::Go => Some("Go"),
            LanguageFilter::Custom(value) => {
                let value = value.trim();
                (!value.is_empty()).then_some(value)
            }
        }
    }
}

impl std::fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageFilter::All => write!(f, "All"),
            LanguageFilter::Custom(value) => write!(f, "Custom ({})", value),
            other => write!(f, "{}", other.query_value().unwrap_or_default()),
        }
    }
}

/// A validated repository search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    keywords: SearchKeywords,
    sort: SortMode,
    language: LanguageFilter,
}

impl SearchRequest {
    pub fn new<T: Into<String>>(
        keywords: T,
        sort: SortMode,
        language: LanguageFilter,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            keywords: SearchKeywords::parse(keywords)?,
            sort,
            language,
        })
    }

    pub fn keywords(&self) -> &SearchKeywords {
        &self.keywords
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn language(&self) -> &LanguageFilter {
        &self.language
    }

    /// Search term as GitHub reads it, e.g. `tetris language:Go`
    pub fn query_term(&self) -> String {
        match self.language.query_value() {
            Some(language) => format!("{} language:{}", self.keywords, language),
            None => self.keywords.to_string(),
        }
    }

    /// Query-string part of the search URL.
    ///
    /// Keywords and language are percent-encoded separately and joined with a
    /// literal `+`, which the server decodes as the space between terms.
    pub fn query_string(&self) -> String {
        let mut query = urlencoding::encode(self.keywords.as_str()).into_owned();
        if let Some(language) = self.language.query_value() {
            query.push_str("+language:");
            query.push_str(&urlencoding::encode(language));
        }

        format!(
            "q={}&sort={}&per_page={}",
            query,
            self.sort.api_token(),
            SEARCH_PAGE_SIZE
        )
    }
}
