use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use github_repo_scout::formatter::{html_document, repository_results_markdown};
use github_repo_scout::github::{GitHubClient, SearchError};
use github_repo_scout::github::client::{DEFAULT_API_BASE_URL, TOKEN_SETTINGS_URL};
use github_repo_scout::services::{CredentialStore, SearchSession, default_credential_path};
use github_repo_scout::types::{ApiToken, LanguageFilter, OutputFormat, SearchRequest, SortMode};

/// Environment variable consulted when `--github-token` is not given
const TOKEN_ENV_VAR: &str = "GITHUB_REPO_SCOUT_TOKEN";

#[derive(Parser)]
#[command(name = "github-repo-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "GitHub Repo Scout - search GitHub repositories by keyword, language and sort order and render the results as HTML"
)]
#[command(
    long_about = "GitHub Repo Scout queries the GitHub repository search API with your keywords, an optional language filter and a sort order, and renders the first 100 results as HTML links (or Markdown/JSON). A personal access token is required; it can be passed per call, read from the GITHUB_REPO_SCOUT_TOKEN environment variable, or saved once with the save-token command."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// GitHub personal access token (can also be set via GITHUB_REPO_SCOUT_TOKEN or stored with save-token)
    #[arg(long, global = true)]
    github_token: Option<String>,
    /// Request timeout in seconds for GitHub API calls (default: 30 seconds)
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
    /// Path of the stored credential file (default: platform data directory)
    #[arg(long, global = true)]
    credential_file: Option<PathBuf>,
    /// GitHub API root, e.g. for GitHub Enterprise Server
    #[arg(long, global = true, default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortOption {
    BestMatch,
    Stars,
    Forks,
    RecentlyUpdated,
}

impl From<SortOption> for SortMode {
    fn from(cli_option: SortOption) -> Self {
        match cli_option {
            SortOption::BestMatch => SortMode::BestMatch,
            SortOption::Stars => SortMode::Stars,
            SortOption::Forks => SortMode::Forks,
            SortOption::RecentlyUpdated => SortMode::RecentlyUpdated,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatCli {
    Html,
    Markdown,
    Json,
}

impl From<OutputFormatCli> for OutputFormat {
    fn from(cli_option: OutputFormatCli) -> Self {
        match cli_option {
            OutputFormatCli::Html => OutputFormat::Html,
            OutputFormatCli::Markdown => OutputFormat::Markdown,
            OutputFormatCli::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search repositories matching keywords, optionally restricted to one language
    Search {
        /// Search keywords - multiple words are joined with spaces
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Sort order requested from GitHub (default: best-match)
        #[arg(short, long, default_value = "best-match")]
        sort: SortOption,
        /// Language filter - all, python, javascript, java, cpp, go, or any other GitHub language name
        #[arg(short, long, default_value = "all")]
        language: String,
        /// Output format for results (default: html)
        #[arg(short, long, default_value = "html")]
        format: OutputFormatCli,
        /// Write results to this file instead of stdout - HTML output becomes a standalone page
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save a GitHub API token for later searches
    SaveToken {
        /// Personal access token to store
        token: String,
    },
    /// Remove the stored GitHub API token
    ForgetToken,
    /// Show the stored GitHub API token in masked form
    ShowToken,
    /// Print the GitHub page where personal access tokens are created
    TokenUrl,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("github_repo_scout=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let credential_path = match cli.credential_file {
        Some(path) => path,
        None => default_credential_path().context("Failed to get credential file location")?,
    };
    let credential_store = CredentialStore::new(credential_path);

    match cli.command {
        Commands::Search {
            keywords,
            sort,
            language,
            format,
            output,
        } => {
            let token = resolve_token(
                cli.github_token,
                env::var(TOKEN_ENV_VAR).ok(),
                &credential_store,
            )?;
            let result = handle_search_command(SearchParams {
                keywords: keywords.join(" "),
                sort: sort.into(),
                language: LanguageFilter::parse(&language),
                format: format.into(),
                output,
                token,
                request_timeout: cli.request_timeout.map(Duration::from_secs),
                api_base_url: &cli.api_base_url,
            })
            .await;

            // Missing keywords or token exit with status 2
            if let Err(error) = &result {
                if let Some(search_error) = error.downcast_ref::<SearchError>() {
                    if search_error.is_validation() {
                        eprintln!("{}", search_error);
                        std::process::exit(2);
                    }
                }
            }
            result?;
        }
        Commands::SaveToken { token } => {
            credential_store
                .save(&ApiToken::new(token))
                .context("Failed to save API key")?;
            println!("API Key saved successfully!");
        }
        Commands::ForgetToken => {
            credential_store
                .forget()
                .context("Failed to forget API key")?;
            println!("API Key forgotten!");
        }
        Commands::ShowToken => match credential_store
            .load()
            .context("Failed to load API key")?
        {
            Some(token) => println!("{}", token.masked()),
            None => println!(
                "No API key stored at {}",
                credential_store.path().display()
            ),
        },
        Commands::TokenUrl => {
            println!("{}", TOKEN_SETTINGS_URL);
        }
    }

    Ok(())
}

/// Token from the command line, then the environment, then the credential file.
///
/// Blank values count as unset. The credential file is read at most once per
/// run. An empty token is passed through so the client reports it as a
/// validation error.
fn resolve_token(
    cli_token: Option<String>,
    env_token: Option<String>,
    store: &CredentialStore,
) -> Result<ApiToken> {
    if let Some(token) = cli_token
        .into_iter()
        .chain(env_token)
        .find(|token| !token.trim().is_empty())
    {
        return Ok(ApiToken::new(token));
    }

    let stored = store.load().context("Failed to load stored API key")?;
    Ok(stored.unwrap_or_else(|| ApiToken::new("")))
}

/// Search command parameters
struct SearchParams<'a> {
    keywords: String,
    sort: SortMode,
    language: LanguageFilter,
    format: OutputFormat,
    output: Option<PathBuf>,
    token: ApiToken,
    request_timeout: Option<Duration>,
    api_base_url: &'a str,
}

/// Handle search command
async fn handle_search_command(params: SearchParams<'_>) -> Result<()> {
    let github_client =
        GitHubClient::with_base_url(params.token, params.request_timeout, params.api_base_url)
            .context("Failed to create GitHub client")?;

    let request = SearchRequest::new(params.keywords, params.sort, params.language)?;
    let title = request.query_term();

    let mut session = SearchSession::new();
    let rendered = session.run(&github_client, request).await?.clone();

    let content = match params.format {
        OutputFormat::Html => match params.output {
            Some(_) => html_document(&rendered, &title),
            None => rendered.0,
        },
        OutputFormat::Markdown => {
            let sort = session
                .current_request()
                .map(|request| request.sort())
                .unwrap_or_default();
            repository_results_markdown(session.last_results(), sort)
        }
        OutputFormat::Json => serde_json::to_string_pretty(session.last_results())?,
    };

    match params.output {
        Some(path) => {
            tokio::fs::write(&path, content)
                .await
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            println!(
                "Wrote {} results to {}",
                session.last_results().len(),
                path.display()
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use github_repo_scout::services::CREDENTIAL_FILE_NAME;

    fn create_test_store(temp_dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(temp_dir.path().join(CREDENTIAL_FILE_NAME))
    }

    #[test]
    fn test_resolve_token_precedence() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&temp_dir);
        store.save(&ApiToken::from("ghp_stored")).unwrap();

        let token = resolve_token(
            Some("ghp_flag".to_string()),
            Some("ghp_env".to_string()),
            &store,
        )
        .unwrap();
        assert_eq!(token.as_str(), "ghp_flag");

        let token = resolve_token(None, Some("ghp_env".to_string()), &store).unwrap();
        assert_eq!(token.as_str(), "ghp_env");

        let token = resolve_token(None, None, &store).unwrap();
        assert_eq!(token.as_str(), "ghp_stored");
    }

    #[test]
    fn test_resolve_token_skips_blank_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&temp_dir);
        store.save(&ApiToken::from("ghp_stored")).unwrap();

        let token = resolve_token(None, Some(String::new()), &store).unwrap();
        assert_eq!(token.as_str(), "ghp_stored");

        let token =
            resolve_token(Some("  ".to_string()), Some("\t".to_string()), &store).unwrap();
        assert_eq!(token.as_str(), "ghp_stored");

        let token =
            resolve_token(Some(" ".to_string()), Some("ghp_env".to_string()), &store).unwrap();
        assert_eq!(token.as_str(), "ghp_env");
    }

    #[test]
    fn test_resolve_token_without_any_source_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&temp_dir);

        let token = resolve_token(Some(String::new()), None, &store).unwrap();
        assert!(token.is_empty());
    }
}
