//! Scope-gated extractors.
//!
//! Each extractor verifies the `Authorization` bearer token and then checks
//! that the resulting claim set carries one specific scope. Extractors run
//! in argument order, so placing the guard first means an unauthenticated
//! request is rejected before its path or body is looked at.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use casting_core::claims::ClaimSet;
use casting_core::scopes::{
    SCOPE_DELETE_ACTORS, SCOPE_DELETE_MOVIES, SCOPE_PATCH_ACTORS, SCOPE_PATCH_MOVIES,
    SCOPE_POST_ACTORS, SCOPE_POST_MOVIES,
};

use crate::error::AppError;
use crate::state::AppState;

/// Verify the request's bearer token and require `scope` on it.
pub async fn require_scope(
    parts: &Parts,
    state: &AppState,
    scope: &str,
) -> Result<ClaimSet, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let claims = state
        .verifier
        .verify_header(header)
        .await
        .inspect_err(|reason| {
            tracing::warn!(path = %parts.uri.path(), %reason, "Rejected bearer token");
        })?;

    claims.authorize(scope).inspect_err(|reason| {
        tracing::warn!(
            path = %parts.uri.path(),
            subject = %claims.subject,
            %reason,
            "Caller lacks required scope",
        );
    })?;

    Ok(claims)
}

macro_rules! scope_guard {
    ($(#[$meta:meta])* $name:ident => $scope:expr) => {
        $(#[$meta])*
        pub struct $name(pub ClaimSet);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                require_scope(parts, state, $scope).await.map($name)
            }
        }
    };
}

scope_guard!(
    /// Requires `post:actors`.
    PostActors => SCOPE_POST_ACTORS
);
scope_guard!(
    /// Requires `post:movies`.
    PostMovies => SCOPE_POST_MOVIES
);
scope_guard!(
    /// Requires `patch:actors`.
    PatchActors => SCOPE_PATCH_ACTORS
);
scope_guard!(
    /// Requires `patch:movies`.
    PatchMovies => SCOPE_PATCH_MOVIES
);
scope_guard!(
    /// Requires `delete:actors`.
    DeleteActors => SCOPE_DELETE_ACTORS
);
scope_guard!(
    /// Requires `delete:movies`.
    DeleteMovies => SCOPE_DELETE_MOVIES
);
