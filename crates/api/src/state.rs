use std::sync::Arc;

use promptforge_provider::PromptProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: promptforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External AI provider; integration tests substitute stubs here.
    pub provider: Arc<dyn PromptProvider>,
}
