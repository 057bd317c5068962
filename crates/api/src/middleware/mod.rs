//! Request extractors that gate routes on the caller's bearer token.

pub mod scope;
