use super::{normalize_cache_target, redact_cache_target};
use crate::domain::ports::CacheStore;
use crate::utils::error::{CatalogError, Result};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Redis-backed cache store.
///
/// The connection is acquired once in [`RedisCache::connect`]; the manager
/// reconnects on its own afterwards. Entries are written without expiry.
/// Only the password-free form of the target is kept, for logs and `Debug`.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
    target: String,
}

impl RedisCache {
    pub async fn connect(target: &str) -> Result<Self> {
        let shown = redact_cache_target(target);
        tracing::debug!("Connecting to cache at {}", shown);

        let client = redis::Client::open(normalize_cache_target(target).as_str())?;
        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CatalogError::CacheUnavailable {
                message: format!("{}: {}", shown, e),
            }
        })?;

        tracing::info!("Connected to cache at {}", shown);
        Ok(Self {
            manager,
            target: shown,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("target", &self.target)
            .finish()
    }
}

impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }
}
