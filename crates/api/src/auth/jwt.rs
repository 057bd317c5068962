//! RS256 bearer-token verification against a JWKS-publishing issuer.
//!
//! The verifier never mints tokens; they are issued by an external identity
//! provider (e.g. Auth0). Verification order is fixed: bearer syntax,
//! segment count, header, key lookup, signature, then registered claims.
//! Scope checks happen afterwards in [`crate::middleware::scope`].

use std::time::Duration;

use anyhow::Context;
use casting_core::claims::{scopes_from_claim, AuthError, ClaimSet};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;

use crate::auth::jwks::JwksCache;
use crate::config::env_or;

/// The only signing algorithm accepted.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Default claim holding the granted permissions (Auth0 RBAC).
const DEFAULT_SCOPES_CLAIM: &str = "permissions";
/// Default clock-skew allowance for `exp`, matching `jsonwebtoken`.
const DEFAULT_LEEWAY_SECS: u64 = 60;
/// Default lifetime of a cached signing key.
const DEFAULT_KEY_CACHE_TTL_SECS: u64 = 3600;

/// Configuration for bearer-token verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Trusted issuer; must equal the token's `iss` exactly.
    pub issuer: String,
    /// This API's identifier; must appear in the token's `aud`.
    pub audience: String,
    /// Where the issuer publishes its signing keys.
    pub jwks_url: String,
    /// Claim read into [`ClaimSet::scopes`].
    pub scopes_claim: String,
    /// Seconds of clock skew tolerated on `exp`.
    pub leeway_secs: u64,
    /// Seconds a fetched signing key stays cached.
    pub key_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default                              |
    /// |---------------------------|----------|--------------------------------------|
    /// | `AUTH_ISSUER`             | **yes**  | --                                   |
    /// | `AUTH_AUDIENCE`           | **yes**  | --                                   |
    /// | `AUTH_JWKS_URL`           | no       | `{issuer}/.well-known/jwks.json`     |
    /// | `AUTH_SCOPES_CLAIM`       | no       | `permissions`                        |
    /// | `AUTH_LEEWAY_SECS`        | no       | `60`                                 |
    /// | `AUTH_KEY_CACHE_TTL_SECS` | no       | `3600`                               |
    pub fn from_env() -> anyhow::Result<Self> {
        let issuer = std::env::var("AUTH_ISSUER").context("AUTH_ISSUER must be set")?;
        anyhow::ensure!(!issuer.trim().is_empty(), "AUTH_ISSUER must not be empty");

        let audience = std::env::var("AUTH_AUDIENCE").context("AUTH_AUDIENCE must be set")?;
        anyhow::ensure!(!audience.trim().is_empty(), "AUTH_AUDIENCE must not be empty");

        let jwks_url = env_or("AUTH_JWKS_URL", default_jwks_url(&issuer))?;
        let scopes_claim = env_or("AUTH_SCOPES_CLAIM", DEFAULT_SCOPES_CLAIM.to_string())?;
        let leeway_secs = env_or("AUTH_LEEWAY_SECS", DEFAULT_LEEWAY_SECS)?;
        let key_cache_ttl_secs = env_or("AUTH_KEY_CACHE_TTL_SECS", DEFAULT_KEY_CACHE_TTL_SECS)?;

        Ok(Self {
            issuer,
            audience,
            jwks_url,
            scopes_claim,
            leeway_secs,
            key_cache_ttl_secs,
        })
    }
}

/// OpenID discovery location of the key set for `issuer`.
pub fn default_jwks_url(issuer: &str) -> String {
    format!("{}/.well-known/jwks.json", issuer.trim_end_matches('/'))
}

/// Registered claims are optional here so that a missing one surfaces as
/// [`ErrorKind::MissingRequiredClaim`] from validation, not a parse error.
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    iss: Option<String>,
    exp: Option<i64>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

/// Verifies bearer tokens and turns them into [`ClaimSet`]s.
pub struct TokenVerifier {
    config: AuthConfig,
    keys: JwksCache,
}

impl TokenVerifier {
    pub fn new(config: AuthConfig) -> Result<Self, reqwest::Error> {
        let keys = JwksCache::new(
            config.jwks_url.clone(),
            Duration::from_secs(config.key_cache_ttl_secs),
        )?;
        Ok(Self { config, keys })
    }

    /// The signing-key cache, e.g. for preloading pinned keys.
    pub fn keys(&self) -> &JwksCache {
        &self.keys
    }

    /// Verify the raw value of an `Authorization` header.
    pub async fn verify_header(&self, header: Option<&str>) -> Result<ClaimSet, AuthError> {
        let token = bearer_token(header)?;
        self.verify(token).await
    }

    /// Verify a compact JWT and return its claims.
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::Malformed);
        }

        let header = decode_header(token).map_err(|_| AuthError::InvalidHeader)?;
        if header.alg != SIGNING_ALGORITHM {
            return Err(AuthError::InvalidHeader);
        }
        let kid = header.kid.ok_or(AuthError::InvalidHeader)?;
        let key = self.keys.get(&kid).await?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
        validation.leeway = self.config.leeway_secs;

        let raw = decode::<RawClaims>(token, &key, &validation)
            .map_err(|err| classify_jwt_error(err.kind()))?
            .claims;

        let (Some(subject), Some(issuer), Some(exp)) = (raw.sub, raw.iss, raw.exp) else {
            return Err(AuthError::InvalidClaims);
        };
        let expires_at = chrono::DateTime::from_timestamp(exp, 0).ok_or(AuthError::InvalidClaims)?;
        let scopes = scopes_from_claim(raw.rest.get(&self.config.scopes_claim));

        Ok(ClaimSet {
            subject,
            scopes,
            expires_at,
            issuer,
        })
    }
}

/// Extract the token from `Bearer <token>`. The scheme is case-insensitive;
/// anything other than exactly two parts is rejected.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::Missing)?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::Missing),
    }
}

fn classify_jwt_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => AuthError::InvalidHeader,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::Malformed,
        _ => AuthError::BadSignature,
    }
}
