use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationCard, RecommendedMovie},
    services::posters::{resolve_posters, PosterProvider},
    store::RecommenderContext,
};

/// Message shown when the query title has no recommendations
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations found. Try another movie!";

/// Outcome of a recommendation lookup
///
/// Lookups never fail outward: on any error `movies` is empty and `error`
/// carries a message fit for the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub movies: Vec<RecommendedMovie>,
    pub error: Option<String>,
}

/// Nearest-neighbour lookup over the precomputed similarity matrix
#[derive(Clone)]
pub struct RecommendationEngine {
    context: Arc<RecommenderContext>,
}

impl RecommendationEngine {
    pub fn new(context: Arc<RecommenderContext>) -> Self {
        Self { context }
    }

    /// Returns up to `k` movies most similar to `title`, best first
    pub fn recommend(&self, title: &str, k: usize) -> Recommendations {
        match self.try_recommend(title, k) {
            Ok(movies) => {
                tracing::debug!(
                    title = %title,
                    results = movies.len(),
                    "Recommendations ranked"
                );
                Recommendations {
                    movies,
                    error: None,
                }
            }
            Err(AppError::NotFound(reason)) => {
                tracing::warn!(title = %title, reason = %reason, "Recommendation query missed");
                Recommendations {
                    movies: Vec::new(),
                    error: Some(NO_RECOMMENDATIONS_MESSAGE.to_string()),
                }
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Failed to rank recommendations");
                Recommendations {
                    movies: Vec::new(),
                    error: Some(format!("Error generating recommendations: {}", e)),
                }
            }
        }
    }

    fn try_recommend(&self, title: &str, k: usize) -> AppResult<Vec<RecommendedMovie>> {
        let catalog = self.context.catalog();
        let index = catalog.index_of(title)?;

        let row = self.context.similarity().row(index).ok_or_else(|| {
            AppError::Internal(format!("No similarity row for catalog index {}", index))
        })?;

        rank_neighbors(row, index, k)
            .into_iter()
            .map(|(candidate, _score)| {
                catalog
                    .get(candidate)
                    .map(RecommendedMovie::from)
                    .ok_or_else(|| {
                        AppError::Internal(format!("No catalog entry at index {}", candidate))
                    })
            })
            .collect()
    }
}

/// Ranks a similarity row, excluding the query itself
///
/// Scores are ordered descending with a stable sort, so equal scores keep
/// ascending index order. NaN scores rank below every number. The query is
/// skipped by index, wherever its self-score lands.
pub fn rank_neighbors(row: &[f32], query: usize, k: usize) -> Vec<(usize, f32)> {
    let mut candidates: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
    candidates.sort_by(|a, b| descending(a.1, b.1));

    candidates
        .into_iter()
        .filter(|(index, _)| *index != query)
        .take(k)
        .collect()
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // -0.0 and 0.0 compare equal so they keep index order
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Ranks recommendations and attaches posters fetched concurrently
pub async fn recommend_with_posters(
    engine: &RecommendationEngine,
    posters: Arc<dyn PosterProvider>,
    title: &str,
    k: usize,
) -> (Vec<RecommendationCard>, Option<String>) {
    let Recommendations { movies, error } = engine.recommend(title, k);

    let ids: Vec<i64> = movies.iter().map(|m| m.movie_id).collect();
    let poster_urls = resolve_posters(posters, &ids).await;

    let cards = movies
        .into_iter()
        .zip(poster_urls)
        .map(|(movie, poster_url)| RecommendationCard {
            title: movie.title,
            movie_id: movie.movie_id,
            poster_url,
        })
        .collect();

    (cards, error)
}
