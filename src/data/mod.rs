//! Core data models for Reelvault
//!
//! This module contains the data types used throughout the application for
//! representing movies, credits, and trailer videos, mirroring the field
//! names of the TMDB v3 API responses.

pub mod posters;
pub mod tmdb;

pub use posters::{poster_cache_id, strip_file_extension, PosterClient, PosterError};
pub use tmdb::{TmdbClient, TmdbError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single movie as returned by the TMDB search and trending endpoints
///
/// Every field except `id` is optional: TMDB omits fields freely, and a
/// missing value renders as a placeholder rather than failing the parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB movie id
    pub id: u64,
    /// Display title
    pub title: Option<String>,
    /// Title in the original language
    pub original_title: Option<String>,
    /// ISO 639-1 code of the original language
    pub original_language: Option<String>,
    /// Plot synopsis
    pub overview: Option<String>,
    /// Poster image path (e.g. "/abc123.jpg"), relative to the image host
    pub poster_path: Option<String>,
    /// Backdrop image path, relative to the image host
    pub backdrop_path: Option<String>,
    /// Release date as "YYYY-MM-DD"
    pub release_date: Option<String>,
    /// Average vote on a 0-10 scale
    pub vote_average: Option<f64>,
    /// Number of votes
    pub vote_count: Option<u64>,
    /// TMDB popularity score
    pub popularity: Option<f64>,
    /// Genre ids
    pub genre_ids: Option<Vec<u32>>,
    /// Adult-content flag
    pub adult: Option<bool>,
    /// Whether this entry is itself a video
    pub video: Option<bool>,
}

impl Movie {
    /// Display title, falling back to the original title
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.original_title.as_deref())
            .unwrap_or("No Movie Title")
    }

    /// Release date parsed from TMDB's "YYYY-MM-DD" format, if present and valid
    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }

    /// Release year, if the release date is known
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date_parsed().map(|date| date.year())
    }
}

/// One page of movie search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Movies on this page
    pub results: Vec<Movie>,
    /// Total number of pages available
    pub total_pages: Option<u32>,
    /// Total number of matching movies
    pub total_results: Option<u32>,
}

/// Cast and crew for a movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    /// TMDB movie id these credits belong to
    pub id: u64,
    /// Cast members, ordered by billing
    pub cast: Vec<CreditEntry>,
    /// Crew members
    pub crew: Vec<CreditEntry>,
}

/// A single cast or crew credit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditEntry {
    /// TMDB person id
    pub id: u64,
    /// Person's name
    pub name: Option<String>,
    /// Person's name in their original language
    pub original_name: Option<String>,
    /// Department the person is best known for
    pub known_for_department: Option<String>,
    /// TMDB popularity score
    pub popularity: Option<f64>,
    /// Profile image path, relative to the image host
    pub profile_path: Option<String>,
    /// Character played (cast entries)
    pub character: Option<String>,
    /// Billing order (cast entries)
    pub order: Option<u32>,
    /// Department (crew entries)
    pub department: Option<String>,
    /// Job title (crew entries)
    pub job: Option<String>,
    /// Unique credit id
    pub credit_id: Option<String>,
}

impl CreditEntry {
    /// Display name, falling back to the original name
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.original_name.as_deref())
            .unwrap_or("Unknown")
    }

    /// The role line for a credit: character for cast, job for crew
    pub fn role(&self) -> Option<&str> {
        self.character.as_deref().or(self.job.as_deref())
    }
}

/// The video list returned by the movie videos endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    /// TMDB movie id these videos belong to
    pub id: u64,
    /// Videos attached to the movie
    pub results: Vec<Video>,
}

/// A single video (trailer, teaser, clip, ...) attached to a movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Video name
    pub name: Option<String>,
    /// Host-side key; for YouTube videos, the watch id
    pub key: String,
    /// Hosting site (e.g. "YouTube")
    pub site: Option<String>,
    /// Video kind: "Trailer", "Teaser", "Clip", "Featurette", ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Whether the video is an official upload
    pub official: Option<bool>,
    /// Publication timestamp
    pub published_at: Option<String>,
    /// Unique video id
    pub id: Option<String>,
}

impl Video {
    /// Whether this video is the movie's trailer
    pub fn is_trailer(&self) -> bool {
        self.kind.as_deref() == Some("Trailer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            id: 603,
            title: Some("The Matrix".to_string()),
            original_title: Some("The Matrix".to_string()),
            original_language: Some("en".to_string()),
            overview: Some("A computer hacker learns about the true nature of reality.".to_string()),
            poster_path: Some("/abc123.jpg".to_string()),
            backdrop_path: Some("/back456.jpg".to_string()),
            release_date: Some("1999-03-31".to_string()),
            vote_average: Some(8.2),
            vote_count: Some(24000),
            popularity: Some(80.5),
            genre_ids: Some(vec![28, 878]),
            adult: Some(false),
            video: Some(false),
        }
    }

    #[test]
    fn test_movie_serialization_roundtrip() {
        let movie = sample_movie();

        let json = serde_json::to_string(&movie).expect("Failed to serialize Movie");
        let deserialized: Movie = serde_json::from_str(&json).expect("Failed to deserialize Movie");

        assert_eq!(deserialized.id, 603);
        assert_eq!(deserialized.title.as_deref(), Some("The Matrix"));
        assert_eq!(deserialized.poster_path.as_deref(), Some("/abc123.jpg"));
        assert_eq!(deserialized.release_date.as_deref(), Some("1999-03-31"));
    }

    #[test]
    fn test_movie_parses_with_missing_optionals() {
        // TMDB omits fields freely; only the id is required
        let json = r#"{"id": 42}"#;
        let movie: Movie = serde_json::from_str(json).expect("Should parse minimal movie");

        assert_eq!(movie.id, 42);
        assert!(movie.title.is_none());
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.display_title(), "No Movie Title");
    }

    #[test]
    fn test_display_title_falls_back_to_original_title() {
        let mut movie = sample_movie();
        movie.title = None;
        movie.original_title = Some("Le Fabuleux Destin".to_string());

        assert_eq!(movie.display_title(), "Le Fabuleux Destin");
    }

    #[test]
    fn test_release_year() {
        let movie = sample_movie();
        assert_eq!(movie.release_year(), Some(1999));

        let mut undated = sample_movie();
        undated.release_date = Some("not-a-date".to_string());
        assert_eq!(undated.release_year(), None);
    }

    #[test]
    fn test_movie_page_parses_tmdb_shape() {
        let json = r#"{
            "page": 1,
            "results": [{"id": 603, "title": "The Matrix"}],
            "total_pages": 10,
            "total_results": 199
        }"#;
        let page: MoviePage = serde_json::from_str(json).expect("Should parse page");

        assert_eq!(page.page, Some(1));
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.total_pages, Some(10));
    }

    #[test]
    fn test_credit_entry_role_prefers_character() {
        let json = r#"{
            "id": 6384,
            "name": "Keanu Reeves",
            "character": "Neo",
            "known_for_department": "Acting",
            "order": 0
        }"#;
        let entry: CreditEntry = serde_json::from_str(json).expect("Should parse cast entry");

        assert_eq!(entry.display_name(), "Keanu Reeves");
        assert_eq!(entry.role(), Some("Neo"));
    }

    #[test]
    fn test_credit_entry_role_uses_job_for_crew() {
        let json = r#"{
            "id": 9339,
            "name": "Lana Wachowski",
            "department": "Directing",
            "job": "Director"
        }"#;
        let entry: CreditEntry = serde_json::from_str(json).expect("Should parse crew entry");

        assert_eq!(entry.role(), Some("Director"));
        assert_eq!(entry.department.as_deref(), Some("Directing"));
    }

    #[test]
    fn test_video_type_field_renames_to_kind() {
        let json = r#"{
            "name": "Official Trailer",
            "key": "vKQi3bBA1y8",
            "site": "YouTube",
            "type": "Trailer",
            "official": true
        }"#;
        let video: Video = serde_json::from_str(json).expect("Should parse video");

        assert!(video.is_trailer());
        assert_eq!(video.key, "vKQi3bBA1y8");
    }

    #[test]
    fn test_video_non_trailer_kinds() {
        for kind in ["Teaser", "Clip", "Featurette", "Behind the Scenes"] {
            let video = Video {
                name: None,
                key: "k".to_string(),
                site: Some("YouTube".to_string()),
                kind: Some(kind.to_string()),
                official: None,
                published_at: None,
                id: None,
            };
            assert!(!video.is_trailer(), "{} should not be a trailer", kind);
        }
    }
}
