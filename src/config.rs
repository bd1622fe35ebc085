use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster lookups. Without it every poster
    /// resolves to the error placeholder.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with `poster_path` to build image URLs
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Per-call timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Columnar JSON catalog snapshot
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Bincode similarity matrix snapshot
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Number of recommendations returned when a request doesn't ask for a count
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500/".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.bin")
}

fn default_recommendation_count() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "tmdb_api_key",
                &self.tmdb_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("tmdb_api_url", &self.tmdb_api_url)
            .field("tmdb_image_base_url", &self.tmdb_image_base_url)
            .field("poster_timeout_secs", &self.poster_timeout_secs)
            .field("catalog_path", &self.catalog_path)
            .field("similarity_path", &self.similarity_path)
            .field("recommendation_count", &self.recommendation_count)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.tmdb_api_key, None);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500/");
        assert_eq!(config.poster_timeout(), Duration::from_secs(5));
        assert_eq!(config.recommendation_count, 5);
        assert_eq!(config.catalog_path, PathBuf::from("data/movies.json"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides_from_env() {
        let config = Config::from_vars(vars(&[
            ("TMDB_API_KEY", "secret"),
            ("POSTER_TIMEOUT_SECS", "2"),
            ("SIMILARITY_PATH", "/tmp/sim.bin"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.tmdb_api_key.as_deref(), Some("secret"));
        assert_eq!(config.poster_timeout(), Duration::from_secs(2));
        assert_eq!(config.similarity_path, PathBuf::from("/tmp/sim.bin"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_vars(vars(&[("TMDB_API_KEY", "super-secret-key")])).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
