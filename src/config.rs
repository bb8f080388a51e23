//! Process-wide dashboard configuration.
//!
//! Read once at startup and treated as immutable afterwards; the client takes
//! it by value at construction time.

/// Configuration injected before startup.
///
/// `api_base_url` defaults to `/api`, matching the platform contract; the
/// HTTP client additionally requires an absolute `http(s)://` URL (see
/// [`crate::client::HttpDataClient::new`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_key: String,
    pub graph_key: String,
    pub api_base_url: String,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            graph_key: String::new(),
            api_base_url: "/api".to_string(),
            environment: "dev".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `GRAPHDASH_*` environment variables.
    /// Binaries call `dotenvy::dotenv().ok()` first so a local `.env` works.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_key: std::env::var("GRAPHDASH_APP_KEY").unwrap_or(defaults.app_key),
            graph_key: std::env::var("GRAPHDASH_GRAPH_KEY").unwrap_or(defaults.graph_key),
            api_base_url: std::env::var("GRAPHDASH_API_BASE_URL").unwrap_or(defaults.api_base_url),
            environment: std::env::var("GRAPHDASH_ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_platform_api_base() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.environment, "dev");
        assert!(config.graph_key.is_empty());
    }

    #[test]
    fn from_env_reads_overrides() {
        std::env::set_var("GRAPHDASH_GRAPH_KEY", "test-graph");
        std::env::set_var("GRAPHDASH_API_BASE_URL", "http://localhost:8081/api");
        let config = AppConfig::from_env();
        assert_eq!(config.graph_key, "test-graph");
        assert_eq!(config.api_base_url, "http://localhost:8081/api");
        // Unset vars keep their defaults.
        assert_eq!(config.environment, "dev");
        std::env::remove_var("GRAPHDASH_GRAPH_KEY");
        std::env::remove_var("GRAPHDASH_API_BASE_URL");
    }
}
