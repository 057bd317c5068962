pub mod actor;
pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the record route tree.
///
/// ```text
/// /actors              list (public), create (post:actors)
/// /actors/{id}         update (patch:actors), delete (delete:actors)
///
/// /movies              list (public), create (post:movies)
/// /movies/{id}         update (patch:movies), delete (delete:movies)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/actors", actor::router())
        .nest("/movies", movie::router())
}
