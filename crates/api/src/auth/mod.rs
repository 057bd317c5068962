//! Bearer-token verification.
//!
//! - [`jwks`] -- process-wide cache of the issuer's RSA signing keys.
//! - [`jwt`] -- RS256 verification producing a [`casting_core::claims::ClaimSet`].

pub mod jwks;
pub mod jwt;
