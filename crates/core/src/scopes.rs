//! Well-known permission strings.
//!
//! These must match the permissions defined for the API in the identity
//! provider (e.g. the Auth0 API settings).

pub const SCOPE_POST_ACTORS: &str = "post:actors";
pub const SCOPE_POST_MOVIES: &str = "post:movies";
pub const SCOPE_PATCH_ACTORS: &str = "patch:actors";
pub const SCOPE_PATCH_MOVIES: &str = "patch:movies";
pub const SCOPE_DELETE_ACTORS: &str = "delete:actors";
pub const SCOPE_DELETE_MOVIES: &str = "delete:movies";
