//! Actor entity model and DTOs.

use casting_core::error::CoreError;
use casting_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{lenient, validation_failed};

/// A row from the `actors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub age: Option<String>,
    pub gender: Option<String>,
}

/// DTO for creating an actor. `name` is mandatory; see [`CreateActor::ensure_valid`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(length(min = 1, max = 180, message = "must be 1 to 180 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub age: Option<String>,
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub gender: Option<String>,
}

impl CreateActor {
    /// Reject a create request without a name or with out-of-range fields.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        if self.name.is_none() {
            return Err(CoreError::Unprocessable("no name supplied".into()));
        }
        self.validate().map_err(validation_failed)
    }
}

/// DTO for a partial update. Only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActor {
    #[validate(length(min = 1, max = 180, message = "must be 1 to 180 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub age: Option<String>,
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub gender: Option<String>,
}

impl UpdateActor {
    /// True when none of the recognized fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }

    /// Reject an update that would change nothing or carries out-of-range fields.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Unprocessable(
                "Please specify name, age, and / or gender.".into(),
            ));
        }
        self.validate().map_err(validation_failed)
    }
}
