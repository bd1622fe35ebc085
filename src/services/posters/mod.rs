//! Poster resolution
//!
//! A provider turns a movie id into an image URL and never fails: any problem
//! collapses into one of the two placeholder URLs below, so a single bad
//! lookup can't hold back a recommendation list.

use std::sync::Arc;

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

/// Returned when the metadata service has no poster for the movie
pub const NO_IMAGE_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Returned when the poster lookup itself failed
pub const ERROR_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750?text=Error";

/// Source of poster image URLs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolve the poster URL for a movie, falling back to a placeholder
    async fn resolve_poster(&self, movie_id: i64) -> String;
}

/// Resolves posters for several movies concurrently
///
/// One task per id; results come back in input order. A task that dies
/// yields the error placeholder for its slot only.
pub async fn resolve_posters(provider: Arc<dyn PosterProvider>, movie_ids: &[i64]) -> Vec<String> {
    let tasks: Vec<_> = movie_ids
        .iter()
        .map(|&movie_id| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.resolve_poster(movie_id).await })
        })
        .collect();

    let mut urls = Vec::with_capacity(tasks.len());

    for (task, movie_id) in tasks.into_iter().zip(movie_ids) {
        match task.await {
            Ok(url) => urls.push(url),
            Err(e) => {
                tracing::error!(movie_id = movie_id, error = %e, "Poster task join error");
                urls.push(ERROR_PLACEHOLDER_URL.to_string());
            }
        }
    }

    urls
}
