use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Two-tier cache for read-heavy match listings
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Only the matches endpoint is served from here; discovery and swipe paths
/// always hit the store so they see the latest swipes. Entries are
/// TTL-bounded and invalidated for both owners whenever a new match forms.
pub struct CacheManager {
    redis: Mutex<ConnectionManager>,
    l1: moka::future::Cache<String, String>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1 = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Mutex::new(redis),
            l1,
            ttl_secs,
        })
    }

    /// Look up a cached value, checking L1 before Redis
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        if let Some(json) = self.l1.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                self.l1.insert(key.to_string(), json.clone()).await;
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }

    /// Store a value in both tiers with the configured TTL
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;

        self.l1.insert(key.to_string(), json.clone()).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;

        Ok(())
    }

    /// Drop a key from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1.invalidate(key).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut *conn)
            .await?;

        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for an owner's hydrated match list
    pub fn matches(owner_id: &str) -> String {
        format!("matches:{}", owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::matches("user123"), "matches:user123");
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_round_trip() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = CacheKey::matches("test_owner");

        cache.set(&key, &vec![1_i64, 2, 3]).await.unwrap();
        let cached: Option<Vec<i64>> = cache.get(&key).await.unwrap();
        assert_eq!(cached, Some(vec![1, 2, 3]));

        cache.delete(&key).await.unwrap();
        let gone: Option<Vec<i64>> = cache.get(&key).await.unwrap();
        assert!(gone.is_none());
    }
}
