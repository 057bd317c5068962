//! Verified token claims and the scope authorizer.
//!
//! A [`ClaimSet`] is produced fresh for every request by the API crate's
//! token verifier and is never persisted. [`ClaimSet::authorize`] is the
//! single place that decides whether a request may invoke a protected
//! operation.

use std::collections::BTreeSet;

use crate::types::Timestamp;

/// Reasons a bearer token can be rejected.
///
/// Every variant is reported to the client with the same generic message;
/// the variant itself is only logged so operators can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header is missing or not a bearer token")]
    Missing,

    #[error("token is not a well-formed JWT")]
    Malformed,

    #[error("token header has no key id or an unsupported algorithm")]
    InvalidHeader,

    #[error("no signing key matches the token key id")]
    KeyNotFound,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token audience, issuer or required claims are invalid")]
    InvalidClaims,

    #[error("token lacks the required scope `{required}`")]
    InsufficientScope { required: String },
}

impl AuthError {
    /// HTTP status carried by this failure: 403 when the caller is known
    /// but not permitted, 401 for everything else.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InsufficientScope { .. } => 403,
            _ => 401,
        }
    }
}

/// Decoded and verified payload of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// `sub` claim, e.g. `auth0|64f1...`.
    pub subject: String,
    /// Permission strings granted to the token.
    pub scopes: BTreeSet<String>,
    /// `exp` claim.
    pub expires_at: Timestamp,
    /// `iss` claim.
    pub issuer: String,
}

impl ClaimSet {
    /// Whether `scope` was granted to this token.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Deny with [`AuthError::InsufficientScope`] unless `required` is one of
    /// the granted scopes.
    pub fn authorize(&self, required: &str) -> Result<(), AuthError> {
        if self.has_scope(required) {
            Ok(())
        } else {
            Err(AuthError::InsufficientScope {
                required: required.to_string(),
            })
        }
    }
}

/// Read a scope claim that may be either a JSON array of strings
/// (`"permissions": ["post:actors"]`) or a space-delimited OAuth string
/// (`"scope": "openid post:actors"`).
///
/// Anything else, including an absent claim, grants no scopes.
pub fn scopes_from_claim(value: Option<&serde_json::Value>) -> BTreeSet<String> {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect(),
        Some(serde_json::Value::String(joined)) => {
            joined.split_whitespace().map(str::to_string).collect()
        }
        _ => BTreeSet::new(),
    }
}
