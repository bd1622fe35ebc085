use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog entry
///
/// `index` is the row/column of this movie in the similarity matrix and is
/// always equal to its position in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Stable external identifier (TMDB movie id)
    pub id: i64,
    pub title: String,
    pub index: usize,
}

/// A movie returned by the recommendation engine, before poster enrichment
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedMovie {
    pub title: String,
    pub movie_id: i64,
}

impl From<&Movie> for RecommendedMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            movie_id: movie.id,
        }
    }
}

/// Entry in the title selector list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub movie_id: i64,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
        }
    }
}

/// A recommendation with its resolved poster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationCard {
    pub title: String,
    pub movie_id: i64,
    pub poster_url: String,
}

/// Request body for the recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Response body for the recommendations endpoint
///
/// An unknown title is not an HTTP error: the list is empty and `message`
/// tells the user to try another movie.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub recommendations: Vec<RecommendationCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness of the recommendation snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotStatus {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of `GET /movie/{id}` we care about
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
