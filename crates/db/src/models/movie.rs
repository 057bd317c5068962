//! Movie entity model and DTOs.

use casting_core::error::CoreError;
use casting_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{lenient, validation_failed};

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub release_date: Option<String>,
}

/// DTO for creating a movie. `title` is mandatory.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = 180, message = "must be 1 to 180 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(max = 180, message = "must be at most 180 characters"))]
    pub release_date: Option<String>,
}

impl CreateMovie {
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        if self.title.is_none() {
            return Err(CoreError::Unprocessable("no movie title supplied".into()));
        }
        self.validate().map_err(validation_failed)
    }
}

/// DTO for a partial update. Only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(length(min = 1, max = 180, message = "must be 1 to 180 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    #[validate(length(max = 180, message = "must be at most 180 characters"))]
    pub release_date: Option<String>,
}

impl UpdateMovie {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_date.is_none()
    }

    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Unprocessable(
                "Please specify title and / or release_date.".into(),
            ));
        }
        self.validate().map_err(validation_failed)
    }
}
