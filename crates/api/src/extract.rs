//! Extractors that reject with [`AppError`] instead of axum's plain-text
//! rejections, so malformed input still gets the JSON error envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use casting_core::error::CoreError;
use casting_core::types::DbId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// JSON request body. The body must be a JSON object; any other value, a
/// syntax error, a field of the wrong type, or a missing content type
/// becomes a 422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| unprocessable(rejection.body_text()))?;

        if !value.is_object() {
            return Err(unprocessable("request body must be a JSON object".into()));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|err| unprocessable(err.to_string()))
    }
}

fn unprocessable(message: String) -> AppError {
    AppError::Core(CoreError::Unprocessable(message))
}

/// Numeric `{id}` path segment. A non-numeric id cannot name a record, so
/// it is reported as not found.
pub struct RecordId(pub DbId);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::NoRoute(rejection.body_text()))?;
        Ok(RecordId(id))
    }
}
