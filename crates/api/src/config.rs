use promptforge_core::quota::DEFAULT_FREE_MONTHLY_LIMIT;
use promptforge_provider::client::{ProviderConfig, DEFAULT_TIMEOUT_SECS};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90` -- generation requests
    /// hold the connection open for the provider call).
    pub request_timeout_secs: u64,
    /// Monthly generation cap for free-tier users.
    pub free_monthly_limit: i64,
    /// Upstream AI provider connection settings.
    pub provider: ProviderConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                   |
    /// |---------------------------|---------------------------|
    /// | `HOST`                    | `0.0.0.0`                 |
    /// | `PORT`                    | `3000`                    |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`    | `90`                      |
    /// | `FREE_TIER_MONTHLY_LIMIT` | `20`                      |
    /// | `PROVIDER_BASE_URL`       | `https://api.openai.com`  |
    /// | `PROVIDER_API_KEY`        | (empty)                   |
    /// | `PROVIDER_MODEL`          | `gpt-4o-mini`             |
    /// | `PROVIDER_TIMEOUT_SECS`   | `60`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let free_monthly_limit: i64 = std::env::var("FREE_TIER_MONTHLY_LIMIT")
            .unwrap_or_else(|_| DEFAULT_FREE_MONTHLY_LIMIT.to_string())
            .parse()
            .expect("FREE_TIER_MONTHLY_LIMIT must be a valid i64");

        let provider = ProviderConfig {
            base_url: std::env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            api_key: std::env::var("PROVIDER_API_KEY").unwrap_or_default(),
            completion_model: std::env::var("PROVIDER_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".into()),
            timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .expect("PROVIDER_TIMEOUT_SECS must be a valid u64"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            free_monthly_limit,
            provider,
        }
    }
}
