//! Command-line interface parsing for Reelvault
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --search flag for jumping straight to results, the API token, and the
//! poster cache expiration.

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The --search argument was empty or whitespace
    #[error("Empty search query. Pass a movie title, e.g. --search \"the matrix\"")]
    EmptyQuery,
}

/// Reelvault - Search movies, browse cast and crew, cache posters on disk
#[derive(Parser, Debug)]
#[command(name = "reelvault")]
#[command(about = "Terminal movie search client")]
#[command(version)]
pub struct Cli {
    /// Run this search immediately and open on the results list
    ///
    /// Example: reelvault --search "the matrix"
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// TMDB v4 API read access token
    #[arg(long, env = "TMDB_API_KEY", value_name = "TOKEN", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Poster cache expiration in days; entries older than this are
    /// deleted on startup (0 empties the cache every start)
    #[arg(long, value_name = "DAYS", default_value_t = 1)]
    pub cache_days: u64,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Search to run immediately on startup, if any
    pub initial_query: Option<String>,
    /// TMDB API token, if provided
    pub api_key: Option<String>,
    /// Poster cache expiration in days
    pub cache_days: u64,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if --search was given an empty query
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_query = match &cli.search {
            None => None,
            Some(query) => {
                let trimmed = query.trim();
                if trimmed.is_empty() {
                    return Err(CliError::EmptyQuery);
                }
                Some(trimmed.to_string())
            }
        };

        Ok(StartupConfig {
            initial_query,
            api_key: cli.api_key.clone(),
            cache_days: cli.cache_days,
        })
    }
}
