//! Process-wide cache of the identity provider's public signing keys.
//!
//! Keys are looked up by the `kid` carried in a token header. A miss
//! triggers one fetch of the JWKS document; concurrent misses may each
//! fetch, which is harmless because a refresh only inserts keys. A `kid`
//! still absent after a successful fetch is remembered for a short while
//! so repeated tokens naming it do not each hit the identity provider.

use std::sync::Arc;
use std::time::Duration;

use casting_core::claims::AuthError;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::DecodingKey;
use moka::sync::Cache;

/// Upper bound on cached keys. Providers publish a handful at most.
const MAX_CACHED_KEYS: u64 = 100;
/// Timeout for a single JWKS fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
/// Largest JWKS document accepted from the endpoint.
const MAX_JWKS_BYTES: usize = 512 * 1024;
/// How long a `kid` missing from a fresh key set is answered without refetching.
const UNKNOWN_KID_TTL: Duration = Duration::from_secs(30);

/// Why a key-set refresh failed.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("JWKS response exceeds 512 KiB")]
    TooLarge,

    #[error("JWKS response is not a key set: {0}")]
    Parse(#[from] serde_json::Error),
}

/// RSA public keys keyed by `kid`, filled lazily from a JWKS endpoint.
#[derive(Clone)]
pub struct JwksCache {
    keys: Cache<String, Arc<DecodingKey>>,
    unknown_kids: Cache<String, ()>,
    client: reqwest::Client,
    jwks_url: String,
}

impl JwksCache {
    /// Build an empty cache for `jwks_url`. Entries expire after `ttl` so
    /// rotated keys are picked up on the next miss.
    pub fn new(jwks_url: impl Into<String>, ttl: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("casting-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            keys: Cache::builder()
                .max_capacity(MAX_CACHED_KEYS)
                .time_to_live(ttl)
                .build(),
            unknown_kids: Cache::builder()
                .max_capacity(MAX_CACHED_KEYS)
                .time_to_live(UNKNOWN_KID_TTL)
                .build(),
            client,
            jwks_url: jwks_url.into(),
        })
    }

    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Insert every usable key from `set`, returning how many were stored.
    ///
    /// Keys without a `kid` and non-RSA keys are skipped.
    pub fn insert_key_set(&self, set: &JwkSet) -> usize {
        let mut inserted = 0;
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.as_ref() else {
                continue;
            };
            if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
                tracing::debug!(%kid, "Skipping non-RSA signing key");
                continue;
            }
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    self.keys.insert(kid.clone(), Arc::new(key));
                    inserted += 1;
                }
                Err(err) => tracing::warn!(%kid, error = %err, "Skipping unusable signing key"),
            }
        }
        inserted
    }

    /// Resolve `kid` to a decoding key, fetching the key set once on a miss.
    pub async fn get(&self, kid: &str) -> Result<Arc<DecodingKey>, AuthError> {
        if let Some(key) = self.keys.get(kid) {
            return Ok(key);
        }
        if self.unknown_kids.contains_key(kid) {
            return Err(AuthError::KeyNotFound);
        }

        match self.refresh().await {
            Ok(count) => {
                tracing::info!(url = %self.jwks_url, keys = count, %kid, "Refreshed signing keys");
            }
            Err(err) => {
                tracing::error!(url = %self.jwks_url, error = %err, "Failed to fetch signing keys");
                return Err(AuthError::KeyNotFound);
            }
        }

        self.keys.get(kid).ok_or_else(|| {
            tracing::warn!(%kid, "Signing key not published by the identity provider");
            self.unknown_kids.insert(kid.to_string(), ());
            AuthError::KeyNotFound
        })
    }

    async fn refresh(&self) -> Result<usize, FetchError> {
        let mut response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?;

        if response
            .content_length()
            .is_some_and(|len| len > MAX_JWKS_BYTES as u64)
        {
            return Err(FetchError::TooLarge);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_JWKS_BYTES {
                return Err(FetchError::TooLarge);
            }
            body.extend_from_slice(&chunk);
        }

        let set: JwkSet = serde_json::from_slice(&body)?;
        Ok(self.insert_key_set(&set))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const FIXTURE_JWKS: &str = include_str!("../../tests/fixtures/jwks.json");

    fn fixture_set() -> JwkSet {
        serde_json::from_str(FIXTURE_JWKS).unwrap()
    }

    /// Nothing listens on the discard port, so any refresh fails fast.
    fn offline_cache() -> JwksCache {
        JwksCache::new("http://127.0.0.1:9/jwks.json", Duration::from_secs(60)).unwrap()
    }

    #[test]
    fn test_insert_key_set_stores_rsa_keys() {
        let cache = offline_cache();
        assert_eq!(cache.insert_key_set(&fixture_set()), 1);
    }

    #[test]
    fn test_insert_key_set_skips_keys_without_kid() {
        let mut set = fixture_set();
        set.keys[0].common.key_id = None;
        assert_eq!(offline_cache().insert_key_set(&set), 0);
    }

    #[test]
    fn test_insert_key_set_skips_symmetric_keys() {
        let set: JwkSet = serde_json::from_value(serde_json::json!({
            "keys": [{"kty": "oct", "kid": "hmac", "k": "c2VjcmV0"}]
        }))
        .unwrap();
        assert_eq!(offline_cache().insert_key_set(&set), 0);
    }

    #[tokio::test]
    async fn test_preloaded_key_is_served_without_fetch() {
        let cache = offline_cache();
        cache.insert_key_set(&fixture_set());
        assert!(cache.get("casting-test-key").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_key_not_found() {
        let cache = offline_cache();
        assert_matches!(cache.get("unknown").await.err(), Some(AuthError::KeyNotFound));
    }
}
