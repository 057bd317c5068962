//! Response envelope types for API handlers.
//!
//! Every body carries a `success` flag next to its payload key
//! (`actors`, `movie`, `delete`, ...). Errors use [`ErrorResponse`].

use axum::http::StatusCode;
use casting_core::types::DbId;
use casting_db::models::actor::Actor;
use casting_db::models::movie::Movie;
use serde::Serialize;

/// `{ "success": true, "actors": [...] }`
#[derive(Debug, Serialize)]
pub struct ActorListResponse {
    pub success: bool,
    pub actors: Vec<Actor>,
}

impl ActorListResponse {
    pub fn new(actors: Vec<Actor>) -> Self {
        Self {
            success: true,
            actors,
        }
    }
}

/// `{ "success": true, "actor": {...} }`
#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub success: bool,
    pub actor: Actor,
}

impl ActorResponse {
    pub fn new(actor: Actor) -> Self {
        Self {
            success: true,
            actor,
        }
    }
}

/// `{ "success": true, "movies": [...] }`
#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub success: bool,
    pub movies: Vec<Movie>,
}

impl MovieListResponse {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            success: true,
            movies,
        }
    }
}

/// `{ "success": true, "movie": {...} }`
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub success: bool,
    pub movie: Movie,
}

impl MovieResponse {
    pub fn new(movie: Movie) -> Self {
        Self {
            success: true,
            movie,
        }
    }
}

/// `{ "success": true, "delete": <id> }`
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub delete: DbId,
}

impl DeletedResponse {
    pub fn new(id: DbId) -> Self {
        Self {
            success: true,
            delete: id,
        }
    }
}

/// `{ "success": false, "error": <status>, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message,
        }
    }
}
