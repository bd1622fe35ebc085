use std::sync::Arc;

use movie_recommender::{
    config::Config,
    routes::{create_router, AppState, SnapshotPaths},
    services::TmdbPosterProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let posters = Arc::new(TmdbPosterProvider::from_config(&config)?);
    let state = AppState::new(
        SnapshotPaths::from(&config),
        posters,
        config.recommendation_count,
    );

    // A failed load is not fatal: the API reports the data as unavailable
    // until a reload succeeds.
    if let Err(e) = state.reload().await {
        tracing::error!(error = %e, "Starting without recommendation data");
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
