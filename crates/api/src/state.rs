use std::sync::Arc;

use daybook_suggest::SuggestionService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: daybook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Note idea suggestions (possibly unconfigured).
    pub suggestions: SuggestionService,
}
