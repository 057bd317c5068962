use std::sync::Arc;

use crate::auth::jwt::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: casting_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer-token verifier, including the shared signing-key cache.
    pub verifier: Arc<TokenVerifier>,
}
