use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct PosterResponse {
    pub movie_id: i64,
    pub poster_url: String,
}

/// Resolves a single poster; always succeeds, possibly with a placeholder
pub async fn poster(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Json<PosterResponse> {
    let poster_url = state.posters.resolve_poster(movie_id).await;
    Json(PosterResponse {
        movie_id,
        poster_url,
    })
}
