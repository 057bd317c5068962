//! Route definitions for the `/actors` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::actor;
use crate::state::AppState;

/// Routes mounted at `/actors`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// PATCH  /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(actor::list).post(actor::create))
        .route("/{id}", patch(actor::update).delete(actor::delete))
}
