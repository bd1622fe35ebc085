use axum::{extract::State, Extension, Json};

use crate::{error::AppResult, middleware::RequestId, models::SnapshotStatus, routes::AppState};

/// Reloads both snapshots from disk
pub async fn reload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<SnapshotStatus>> {
    tracing::info!(request_id = %request_id, "Reloading recommendation snapshots");

    state.reload().await?;

    Ok(Json(state.status().await))
}
