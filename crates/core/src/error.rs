use crate::claims::AuthError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A single record looked up by id does not exist.
    #[error("No {entity} found with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A list endpoint found no rows. Reported as not-found rather than an
    /// empty list to keep the established API contract.
    #[error("No {collection} found!")]
    EmptyCollection { collection: &'static str },

    #[error("{0}")]
    Unprocessable(String),

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}
