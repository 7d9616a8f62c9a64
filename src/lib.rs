/// Output formatting utilities for HTML and Markdown representations
pub mod formatter;

/// GitHub REST client for repository search
pub mod github;

/// Credential persistence and search session state
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
