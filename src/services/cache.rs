//! Redis cache for persisted ROI calculations.
//!
//! Values are stored as JSON with a TTL. Read failures are logged and
//! reported as a miss so a Redis outage only costs a database round trip.
//! When a refresh after a database write fails, the old entry is evicted so
//! readers never see a value older than the database.

use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: Duration,
}

impl RedisCache {
    pub async fn new(redis_url: &str, default_ttl_seconds: u64) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;

        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        tracing::info!("Redis cache connected");

        Ok(Self {
            conn,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        })
    }

    #[instrument(skip(self), fields(cache_hit))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.conn.clone();

        let hit = match conn.get::<_, Option<String>>(key).await {
            Ok(Some(data)) => match serde_json::from_str(&data) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = key, error = %e, "Failed to deserialize cached value");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!(key = key, error = %e, "Redis get error");
                None
            }
        };

        debug!(key = key, hit = hit.is_some(), "Cache lookup");
        tracing::Span::current().record("cache_hit", hit.is_some());
        hit
    }

    /// Store a value with the default TTL
    #[instrument(skip(self, value))]
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut conn = self.conn.clone();

        let data = serde_json::to_string(value).context("Failed to serialize value for cache")?;

        conn.set_ex::<_, _, ()>(key, data, self.default_ttl.as_secs())
            .await
            .context("Failed to set cache value")?;

        debug!(key = key, ttl_secs = self.default_ttl.as_secs(), "Cached value");
        Ok(())
    }

    /// Like `set`, but only logs on failure
    pub async fn set_quietly<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.set(key, value).await {
            warn!(key = key, error = %e, "Failed to cache value");
        }
    }

    /// Overwrite an entry whose source row just changed; evicts it when the write fails
    pub async fn replace_quietly<T: Serialize>(&self, key: &str, value: &T) -> Replaced {
        match serde_json::to_string(value) {
            Ok(data) => replace_entry(self, key, data).await,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to serialize value for cache");
                evict_entry(self, key).await
            }
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis health check failed")?;
        Ok(())
    }
}

/// Outcome of [`RedisCache::replace_quietly`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replaced {
    Stored,
    Evicted,
    /// Neither write nor eviction went through; the old entry may live until its TTL
    Stale,
}

/// Raw writes the replacement logic needs
trait EntryStore {
    fn put(&self, key: &str, data: String) -> impl Future<Output = Result<()>> + Send;
    fn evict(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

impl EntryStore for RedisCache {
    fn put(&self, key: &str, data: String) -> impl Future<Output = Result<()>> + Send {
        let mut conn = self.conn.clone();
        let ttl = self.default_ttl.as_secs();
        let key = key.to_string();
        async move {
            conn.set_ex::<_, _, ()>(&key, data, ttl)
                .await
                .context("Failed to set cache value")
        }
    }

    fn evict(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        let mut conn = self.conn.clone();
        let key = key.to_string();
        async move {
            conn.del::<_, ()>(&key)
                .await
                .context("Failed to delete cache value")
        }
    }
}

async fn replace_entry<S: EntryStore + Sync>(store: &S, key: &str, data: String) -> Replaced {
    match store.put(key, data).await {
        Ok(()) => {
            debug!(key = key, "Cache entry replaced");
            Replaced::Stored
        }
        Err(e) => {
            warn!(key = key, error = %e, "Failed to refresh cache entry");
            evict_entry(store, key).await
        }
    }
}

async fn evict_entry<S: EntryStore + Sync>(store: &S, key: &str) -> Replaced {
    match store.evict(key).await {
        Ok(()) => Replaced::Evicted,
        Err(e) => {
            error!(key = key, error = %e, "Failed to evict cache entry, it may be stale until expiry");
            Replaced::Stale
        }
    }
}


/// Cache key builders
pub mod keys {
    use uuid::Uuid;

    /// A user's persisted calculation for one design
    pub fn roi_calculation(user_id: Uuid, design_id: &str) -> String {
        format!("roi:user:{}:design:{}", user_id, design_id)
    }

}
