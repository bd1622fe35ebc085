use axum::{extract::State, Extension, Json};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::{recommendations::recommend_with_posters, RecommendationEngine},
};

/// Upper bound on `count` in a single request
pub const MAX_RECOMMENDATIONS: usize = 50;

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let count = request.count.unwrap_or(state.recommendation_count);
    if count == 0 || count > MAX_RECOMMENDATIONS {
        return Err(AppError::InvalidInput(format!(
            "count must be between 1 and {}",
            MAX_RECOMMENDATIONS
        )));
    }

    let context = state.context().await?;

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        count = count,
        "Processing recommendation request"
    );

    let engine = RecommendationEngine::new(context);
    let (recommendations, message) =
        recommend_with_posters(&engine, state.posters.clone(), &request.title, count).await;

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        query: request.title,
        recommendations,
        message,
    }))
}
