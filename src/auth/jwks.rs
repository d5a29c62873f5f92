//! JWKS cache for Supabase JWT verification

use anyhow::{Context, Result};
use backoff::ExponentialBackoffBuilder;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::Claims;

/// Minimum gap between two JWKS fetches
const REFETCH_INTERVAL: Duration = Duration::from_secs(1);

/// Give up retrying a JWKS fetch after this long
const FETCH_RETRY_BUDGET: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

#[derive(Clone)]
struct CachedKey {
    key: DecodingKey,
    cached_at: Instant,
}

struct KeySet {
    keys: HashMap<String, CachedKey>,
    last_fetch: Option<Instant>,
}

/// Signing keys fetched from the JWKS endpoint, cached per `kid` with a TTL
#[derive(Clone)]
pub struct JwksCache {
    inner: Arc<RwLock<KeySet>>,
    /// Serializes refreshes so concurrent misses share one fetch
    fetch_lock: Arc<Mutex<()>>,
    http: reqwest::Client,
    jwks_url: String,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwksCache {
    pub fn new(
        http: reqwest::Client,
        jwks_url: String,
        issuer: String,
        audience: String,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(KeySet {
                keys: HashMap::new(),
                last_fetch: None,
            })),
            fetch_lock: Arc::new(Mutex::new(())),
            http,
            jwks_url,
            issuer,
            audience,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Verify an RS256 token's signature, issuer, audience and expiry
    pub async fn verify_token(&self, token: &str) -> Result<Claims> {
        let header = decode_header(token).context("Invalid JWT header")?;
        let kid = header.kid.context("JWT missing kid header")?;

        let decoding_key = self.get_or_fetch_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).context("JWT validation failed")?;

        Ok(token_data.claims)
    }

    fn cached_key(&self, kid: &str) -> Option<DecodingKey> {
        let set = self.inner.read();
        set.keys
            .get(kid)
            .filter(|cached| cached.cached_at.elapsed() < self.ttl)
            .map(|cached| cached.key.clone())
    }

    async fn get_or_fetch_key(&self, kid: &str) -> Result<DecodingKey> {
        if let Some(key) = self.cached_key(kid) {
            return Ok(key);
        }

        let _fetching = self.fetch_lock.lock().await;
        // Filled in while we waited on another request's fetch
        if let Some(key) = self.cached_key(kid) {
            return Ok(key);
        }

        self.refresh_keys().await?;

        self.cached_key(kid).context("Key not found in JWKS")
    }

    async fn refresh_keys(&self) -> Result<()> {
        {
            let set = self.inner.read();
            if let Some(last) = set.last_fetch {
                if last.elapsed() < REFETCH_INTERVAL {
                    return Ok(());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        let mut set = self.inner.write();
        set.last_fetch = Some(Instant::now());

        for jwk in jwks.keys {
            let (n, e) = match (jwk.kty.as_str(), &jwk.n, &jwk.e) {
                ("RSA", Some(n), Some(e)) => (n, e),
                _ => continue,
            };

            match DecodingKey::from_rsa_components(n, e) {
                Ok(key) => {
                    set.keys.insert(
                        jwk.kid.clone(),
                        CachedKey {
                            key,
                            cached_at: Instant::now(),
                        },
                    );
                    tracing::debug!(kid = %jwk.kid, "Cached JWKS key");
                }
                Err(e) => {
                    tracing::warn!(kid = %jwk.kid, error = %e, "Failed to parse JWK");
                }
            }
        }

        tracing::info!(keys = set.keys.len(), "JWKS cache refreshed");
        Ok(())
    }

    /// Fetch the key set, retrying connection failures and 5xx responses
    async fn fetch_jwks(&self) -> Result<JwksResponse> {
        tracing::debug!(url = %self.jwks_url, "Fetching JWKS");

        let policy = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(FETCH_RETRY_BUDGET))
            .build();

        backoff::future::retry(policy, move || async move {
            let response = self
                .http
                .get(&self.jwks_url)
                .timeout(Duration::from_secs(5))
                .send()
                .await
                .map_err(|e| backoff::Error::transient(anyhow::Error::new(e).context("Failed to fetch JWKS")))?;

            let status = response.status();
            if status.is_server_error() {
                return Err(backoff::Error::transient(anyhow::anyhow!(
                    "JWKS fetch failed with status: {status}"
                )));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(anyhow::anyhow!(
                    "JWKS fetch failed with status: {status}"
                )));
            }

            response
                .json::<JwksResponse>()
                .await
                .map_err(|e| backoff::Error::permanent(anyhow::Error::new(e).context("Failed to parse JWKS")))
        })
        .await
    }

    /// Fetch keys ahead of the first request
    pub async fn warm_cache(&self) -> Result<()> {
        let _fetching = self.fetch_lock.lock().await;
        self.refresh_keys().await
    }
}
