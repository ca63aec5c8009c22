//! Poster image fetching and cache-key normalization
//!
//! Fetches poster bytes from the TMDB image host and decodes them, and
//! provides the key normalization the disk cache contract requires: cache
//! ids are derived from TMDB image paths with the file extension stripped,
//! so the cache stays agnostic to the original encoding.

use image::DynamicImage;
use reqwest::Client;
use thiserror::Error;

/// Base URL for TMDB poster images at w500 resolution
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Errors that can occur when fetching a poster
#[derive(Debug, Error)]
pub enum PosterError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The image host answered with a non-success status
    #[error("Image host returned HTTP {0}")]
    Status(u16),

    /// Downloaded bytes did not decode as an image
    #[error("Failed to decode image: {0}")]
    DecodeFailed(#[from] image::ImageError),
}

/// Client for downloading poster images from the TMDB image host
#[derive(Debug, Clone)]
pub struct PosterClient {
    client: Client,
    base_url: String,
}

impl Default for PosterClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PosterClient {
    /// Create a new PosterClient against the TMDB image host
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: IMAGE_BASE_URL.to_string(),
        }
    }

    /// Create a client pointed at a custom image host (for tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Downloads and decodes the image at `poster_path`
    ///
    /// # Arguments
    /// * `poster_path` - TMDB image path including the leading slash,
    ///   e.g. "/abc123.jpg"
    pub async fn fetch(&self, poster_path: &str) -> Result<DynamicImage, PosterError> {
        let url = format!("{}{}", self.base_url, poster_path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Removes the file extension from the last segment of a path string.
///
/// Leaves the path untouched when the last segment has no extension or
/// consists only of a leading dot.
pub fn strip_file_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..segment_start + dot],
        _ => path,
    }
}

/// Derives the disk-cache id for a TMDB image path.
///
/// Strips the extension (the cache contract requires ids without one) and
/// the leading slash so the id is a plain flat filename component.
pub fn poster_cache_id(poster_path: &str) -> String {
    strip_file_extension(poster_path)
        .trim_start_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_file_extension_basic() {
        assert_eq!(strip_file_extension("/abc123.jpg"), "/abc123");
        assert_eq!(strip_file_extension("poster.png"), "poster");
    }

    #[test]
    fn test_strip_file_extension_no_extension() {
        assert_eq!(strip_file_extension("/abc123"), "/abc123");
        assert_eq!(strip_file_extension("plain"), "plain");
    }

    #[test]
    fn test_strip_file_extension_keeps_only_last_extension() {
        assert_eq!(strip_file_extension("/archive.tar.gz"), "/archive.tar");
    }

    #[test]
    fn test_strip_file_extension_dot_directories_untouched() {
        // Dots in directory segments are not extensions
        assert_eq!(strip_file_extension("/v1.2/poster"), "/v1.2/poster");
    }

    #[test]
    fn test_strip_file_extension_leading_dot_segment() {
        assert_eq!(strip_file_extension(".hidden"), ".hidden");
        assert_eq!(strip_file_extension("/.hidden"), "/.hidden");
    }

    #[test]
    fn test_poster_cache_id_strips_slash_and_extension() {
        assert_eq!(poster_cache_id("/abc123.jpg"), "abc123");
        assert_eq!(poster_cache_id("/abc123"), "abc123");
        assert_eq!(poster_cache_id("abc123.webp"), "abc123");
    }

    #[test]
    fn test_poster_client_custom_base_url() {
        let client = PosterClient::new().with_base_url("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
