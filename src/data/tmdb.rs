//! TMDB API client
//!
//! This module provides functionality to fetch movie search results, daily
//! trending movies, credits, and trailer keys from the TMDB v3 API using a
//! v4 API read access token for authentication.

use reqwest::Client;

use thiserror::Error;

use super::{Credits, Movie, MoviePage, VideoList};

/// Base URL for the TMDB v3 API
const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Errors that can occur when talking to the TMDB API
#[derive(Debug, Error)]
pub enum TmdbError {
    /// No API token was configured
    #[error("No TMDB API token configured (pass --api-key or set TMDB_API_KEY)")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("TMDB returned HTTP {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the TMDB movie metadata API
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_token: Option<String>,
    base_url: String,
}

impl TmdbClient {
    /// Create a new TmdbClient with the given v4 read access token
    ///
    /// A `None` token produces a client whose every call fails with
    /// `TmdbError::MissingApiKey`; the UI surfaces that as status text.
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_token,
            base_url: TMDB_BASE_URL.to_string(),
        }
    }

    /// Create a client pointed at a custom base URL (for tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether an API token is configured
    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Searches movies by title
    ///
    /// # Arguments
    /// * `query` - Free-text title query
    /// * `page` - 1-based result page
    ///
    /// # Returns
    /// One page of results; an empty `results` list past the last page.
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, TmdbError> {
        let url = format!("{}/search/movie", self.base_url);
        let token = self.token()?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("accept", "application/json")
            .query(&[("query", query), ("page", &page.to_string())])
            .send()
            .await?;

        Self::check_status(&response)?;
        let body = response.text().await?;
        Ok(serde_json::from_str::<MoviePage>(&body)?)
    }

    /// Fetches today's trending movies
    pub async fn trending(&self) -> Result<Vec<Movie>, TmdbError> {
        let url = format!("{}/trending/movie/day", self.base_url);
        let token = self.token()?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("accept", "application/json")
            .send()
            .await?;

        Self::check_status(&response)?;
        let body = response.text().await?;
        let page = serde_json::from_str::<MoviePage>(&body)?;
        Ok(page.results)
    }

    /// Fetches cast and crew for a movie
    pub async fn credits(&self, movie_id: u64) -> Result<Credits, TmdbError> {
        let url = format!("{}/movie/{}/credits", self.base_url, movie_id);
        let token = self.token()?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("accept", "application/json")
            .send()
            .await?;

        Self::check_status(&response)?;
        let body = response.text().await?;
        Ok(serde_json::from_str::<Credits>(&body)?)
    }

    /// Fetches the trailer key for a movie
    ///
    /// Walks the movie's video list and returns the key of the first video
    /// of kind "Trailer". Returns `Ok(None)` when the movie has no trailer.
    pub async fn trailer_key(&self, movie_id: u64) -> Result<Option<String>, TmdbError> {
        let url = format!("{}/movie/{}/videos", self.base_url, movie_id);
        let token = self.token()?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("accept", "application/json")
            .send()
            .await?;

        Self::check_status(&response)?;
        let body = response.text().await?;
        let videos = serde_json::from_str::<VideoList>(&body)?;
        Ok(videos
            .results
            .into_iter()
            .find(|video| video.is_trailer())
            .map(|video| video.key))
    }

    fn token(&self) -> Result<&str, TmdbError> {
        self.api_token.as_deref().ok_or(TmdbError::MissingApiKey)
    }

    fn check_status(response: &reqwest::Response) -> Result<(), TmdbError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TmdbError::Status(status.as_u16()))
        }
    }
}

/// Builds the YouTube watch URL for a trailer key
pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", key)
}
