use thiserror::Error;

/// Failures of a repository search.
///
/// `EmptyKeywords` and `MissingToken` are raised locally before any request
/// is sent. The remaining variants come from the HTTP exchange.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please enter search keywords.")]
    EmptyKeywords,

    #[error("Please enter your GitHub API key.")]
    MissingToken,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Failed to fetch repositories: {status}{}", format_api_message(.message))]
    Status { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl SearchError {
    /// True for errors detected before contacting GitHub
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyKeywords | Self::MissingToken)
    }

    /// HTTP status for remote errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_api_message(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(" ({})", message),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let error = SearchError::Status {
            status: 401,
            message: None,
        };
        assert_eq!(error.to_string(), "Failed to fetch repositories: 401");
        assert_eq!(error.status(), Some(401));
        assert!(!error.is_validation());

        let error = SearchError::Status {
            status: 422,
            message: Some("Validation Failed".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch repositories: 422 (Validation Failed)"
        );
    }

    #[test]
    fn test_validation_errors() {
        assert!(SearchError::EmptyKeywords.is_validation());
        assert!(SearchError::MissingToken.is_validation());
        assert_eq!(SearchError::MissingToken.status(), None);
    }
}
