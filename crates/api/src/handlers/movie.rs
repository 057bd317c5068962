//! Handlers for the `/movies` resource.

use axum::extract::State;
use axum::Json;
use casting_core::error::CoreError;
use casting_core::types::DbId;
use casting_db::models::movie::{CreateMovie, UpdateMovie};
use casting_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, RecordId};
use crate::middleware::scope::{DeleteMovies, PatchMovies, PostMovies};
use crate::response::{DeletedResponse, MovieListResponse, MovieResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "movie",
        id,
    })
}

/// GET /movies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<MovieListResponse>> {
    let movies = MovieRepo::list(&state.pool).await?;
    if movies.is_empty() {
        return Err(AppError::Core(CoreError::EmptyCollection {
            collection: "movies",
        }));
    }
    Ok(Json(MovieListResponse::new(movies)))
}

/// POST /movies
pub async fn create(
    PostMovies(claims): PostMovies,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMovie>,
) -> AppResult<Json<MovieResponse>> {
    input.ensure_valid()?;
    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, subject = %claims.subject, "Movie created");
    Ok(Json(MovieResponse::new(movie)))
}

/// PATCH /movies/{id}
pub async fn update(
    PatchMovies(claims): PatchMovies,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(input): JsonBody<UpdateMovie>,
) -> AppResult<Json<MovieResponse>> {
    MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    input.ensure_valid()?;

    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(movie_id = id, subject = %claims.subject, "Movie updated");
    Ok(Json(MovieResponse::new(movie)))
}

/// DELETE /movies/{id}
pub async fn delete(
    DeleteMovies(claims): DeleteMovies,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<DeletedResponse>> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = id, subject = %claims.subject, "Movie deleted");
    Ok(Json(DeletedResponse::new(id)))
}
