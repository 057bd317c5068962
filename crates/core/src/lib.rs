//! Domain primitives shared by the casting store and API crates.
//!
//! Nothing in here performs I/O: token verification and persistence live in
//! `casting_api` and `casting_db` respectively.

pub mod claims;
pub mod error;
pub mod scopes;
pub mod types;
