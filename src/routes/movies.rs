use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{MovieSummary, SnapshotStatus},
    routes::AppState,
};

/// Lists every catalog title in catalog order, for the title selector
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MovieSummary>>> {
    let context = state.context().await?;
    let movies = context
        .catalog()
        .movies()
        .iter()
        .map(MovieSummary::from)
        .collect();
    Ok(Json(movies))
}

/// Reports whether recommendation data is loaded
pub async fn status(State(state): State<AppState>) -> Json<SnapshotStatus> {
    Json(state.status().await)
}
