//! Handlers for the `/actors` resource.

use axum::extract::State;
use axum::Json;
use casting_core::error::CoreError;
use casting_core::types::DbId;
use casting_db::models::actor::{CreateActor, UpdateActor};
use casting_db::repositories::ActorRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, RecordId};
use crate::middleware::scope::{DeleteActors, PatchActors, PostActors};
use crate::response::{ActorListResponse, ActorResponse, DeletedResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "actor",
        id,
    })
}

/// GET /actors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ActorListResponse>> {
    let actors = ActorRepo::list(&state.pool).await?;
    if actors.is_empty() {
        return Err(AppError::Core(CoreError::EmptyCollection {
            collection: "actors",
        }));
    }
    Ok(Json(ActorListResponse::new(actors)))
}

/// POST /actors
pub async fn create(
    PostActors(claims): PostActors,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateActor>,
) -> AppResult<Json<ActorResponse>> {
    input.ensure_valid()?;
    let actor = ActorRepo::create(&state.pool, &input).await?;
    tracing::info!(actor_id = actor.id, subject = %claims.subject, "Actor created");
    Ok(Json(ActorResponse::new(actor)))
}

/// PATCH /actors/{id}
pub async fn update(
    PatchActors(claims): PatchActors,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(input): JsonBody<UpdateActor>,
) -> AppResult<Json<ActorResponse>> {
    ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    input.ensure_valid()?;

    let actor = ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(actor_id = id, subject = %claims.subject, "Actor updated");
    Ok(Json(ActorResponse::new(actor)))
}

/// DELETE /actors/{id}
pub async fn delete(
    DeleteActors(claims): DeleteActors,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<DeletedResponse>> {
    if !ActorRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(actor_id = id, subject = %claims.subject, "Actor deleted");
    Ok(Json(DeletedResponse::new(id)))
}
