//! Route definitions for the `/movies` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// PATCH  /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movie::list).post(movie::create))
        .route("/{id}", patch(movie::update).delete(movie::delete))
}
