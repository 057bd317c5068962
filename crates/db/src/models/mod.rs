//! Row structs and request DTOs.
//!
//! Request DTOs deserialize every recognized field as optional so that the
//! handlers, not serde, decide which omissions are client errors.

pub mod actor;
pub mod lenient;
pub mod movie;

use casting_core::error::CoreError;
use validator::ValidationErrors;

/// Flatten validator output into a single 422 message.
pub(crate) fn validation_failed(errors: ValidationErrors) -> CoreError {
    CoreError::Unprocessable(errors.to_string())
}
