//! Request handlers for actors and movies.
//!
//! Each submodule provides `list`, `create`, `update` and `delete` for one
//! record type. Handlers delegate to the repositories in `casting_db` and
//! map errors via [`crate::error::AppError`].

pub mod actor;
pub mod movie;
