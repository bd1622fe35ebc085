//! TMDB poster provider
//!
//! Looks up `GET {api_url}/movie/{id}?api_key=...&language=en-US` and joins the
//! returned `poster_path` onto the image host prefix.

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::TmdbMovieDetails,
    services::posters::{PosterProvider, ERROR_PLACEHOLDER_URL, NO_IMAGE_PLACEHOLDER_URL},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_base_url: String,
    timeout: Duration,
}

impl TmdbPosterProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let provider = Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.poster_timeout(),
        )?;

        if provider.api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; posters will use the error placeholder");
        }

        Ok(provider)
    }

    /// Fetches the poster path for a movie; `None` means TMDB has no poster
    async fn fetch_poster_path(&self, movie_id: i64) -> AppResult<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("TMDB API key is not configured".to_string()))?;

        let url = format!("{}/movie/{}", self.api_url, movie_id);

        // Errors carry the request URL, which includes the API key.
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", "en-US")])
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}",
                response.status()
            )));
        }

        let details: TmdbMovieDetails = response
            .json()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        Ok(details.poster_path.filter(|path| !path.is_empty()))
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn resolve_poster(&self, movie_id: i64) -> String {
        match tokio::time::timeout(self.timeout, self.fetch_poster_path(movie_id)).await {
            Ok(Ok(Some(poster_path))) => self.poster_url(&poster_path),
            Ok(Ok(None)) => {
                tracing::debug!(movie_id = movie_id, provider = "tmdb", "No poster available");
                NO_IMAGE_PLACEHOLDER_URL.to_string()
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    movie_id = movie_id,
                    provider = "tmdb",
                    error = %e,
                    "Poster lookup failed"
                );
                ERROR_PLACEHOLDER_URL.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    movie_id = movie_id,
                    provider = "tmdb",
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Poster lookup timed out"
                );
                ERROR_PLACEHOLDER_URL.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Instant;

    const TEST_KEY: &str = "test-key";

    async fn fake_tmdb(
        Path(movie_id): Path<i64>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        if params.get("api_key").map(String::as_str) != Some(TEST_KEY)
            || params.get("language").map(String::as_str) != Some("en-US")
        {
            return StatusCode::UNAUTHORIZED.into_response();
        }

        match movie_id {
            1 => Json(json!({ "id": 1, "poster_path": null })).into_response(),
            2 => Json(json!({ "id": 2, "title": "No poster field" })).into_response(),
            3 => Json(json!({ "id": 3, "poster_path": "" })).into_response(),
            7 => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "poster_path": "/late.jpg" })).into_response()
            }
            8 => (StatusCode::OK, "definitely not json").into_response(),
            404 => StatusCode::NOT_FOUND.into_response(),
            500 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            id => Json(json!({ "id": id, "poster_path": format!("/poster-{}.jpg", id) }))
                .into_response(),
        }
    }

    async fn spawn_fake_tmdb() -> String {
        let app = Router::new().route("/3/movie/:movie_id", get(fake_tmdb));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/3", addr)
    }

    fn provider(api_url: String, api_key: Option<&str>, timeout: Duration) -> TmdbPosterProvider {
        TmdbPosterProvider::new(
            api_key.map(str::to_string),
            api_url,
            "https://image.tmdb.org/t/p/w500/".to_string(),
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolves_poster_url() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some(TEST_KEY), Duration::from_secs(2));

        assert_eq!(
            provider.resolve_poster(550).await,
            "https://image.tmdb.org/t/p/w500//poster-550.jpg"
        );
    }

    #[tokio::test]
    async fn test_null_poster_uses_no_image_placeholder() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some(TEST_KEY), Duration::from_secs(2));

        assert_eq!(provider.resolve_poster(1).await, NO_IMAGE_PLACEHOLDER_URL);
    }

    #[tokio::test]
    async fn test_missing_poster_field_uses_no_image_placeholder() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some(TEST_KEY), Duration::from_secs(2));

        assert_eq!(provider.resolve_poster(2).await, NO_IMAGE_PLACEHOLDER_URL);
        assert_eq!(provider.resolve_poster(3).await, NO_IMAGE_PLACEHOLDER_URL);
    }

    #[tokio::test]
    async fn test_not_found_uses_error_placeholder() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some(TEST_KEY), Duration::from_secs(2));

        assert_eq!(provider.resolve_poster(404).await, ERROR_PLACEHOLDER_URL);
        assert_eq!(provider.resolve_poster(500).await, ERROR_PLACEHOLDER_URL);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_placeholder() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some(TEST_KEY), Duration::from_secs(2));

        assert_eq!(provider.resolve_poster(8).await, ERROR_PLACEHOLDER_URL);
    }

    #[tokio::test]
    async fn test_timeout_uses_error_placeholder() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some(TEST_KEY), Duration::from_millis(200));

        let started = Instant::now();
        assert_eq!(provider.resolve_poster(7).await, ERROR_PLACEHOLDER_URL);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_wrong_key_uses_error_placeholder() {
        let api_url = spawn_fake_tmdb().await;
        let provider = provider(api_url, Some("wrong"), Duration::from_secs(2));

        assert_eq!(provider.resolve_poster(550).await, ERROR_PLACEHOLDER_URL);
    }

    #[tokio::test]
    async fn test_missing_key_uses_error_placeholder() {
        let provider = provider("http://127.0.0.1:9/3".to_string(), None, Duration::from_secs(2));
        assert_eq!(provider.resolve_poster(550).await, ERROR_PLACEHOLDER_URL);
    }

    #[test]
    fn test_blank_key_treated_as_missing() {
        let provider = provider("http://127.0.0.1:9/3".to_string(), Some("   "), Duration::from_secs(1));
        assert!(provider.api_key.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_uses_error_placeholder() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = provider(format!("http://{}/3", addr), Some(TEST_KEY), Duration::from_secs(2));
        assert_eq!(provider.resolve_poster(550).await, ERROR_PLACEHOLDER_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed_from_api_url() {
        let provider = provider("https://api.test/3/".to_string(), None, Duration::from_secs(1));
        assert_eq!(provider.api_url, "https://api.test/3");
    }
}
