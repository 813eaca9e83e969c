//! Best-effort Redis cache for upstream listing responses. A cache failure
//! never fails the request; it is logged and the caller falls through to the
//! upstream API.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct JobCache {
    client: Option<redis::Client>,
    ttl: Duration,
}

impl JobCache {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self {
            client: Some(client),
            ttl,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            client: None,
            ttl: Duration::ZERO,
        }
    }

    fn enabled(&self) -> Option<&redis::Client> {
        self.client.as_ref().filter(|_| !self.ttl.is_zero())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let client = self.enabled()?;
        let raw: Option<String> = match client.get_multiplexed_async_connection().await {
            Ok(mut conn) => match redis::cmd("GET").arg(key).query_async(&mut conn).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(key, error = %e, "cache read failed");
                    return None;
                }
            },
            Err(e) => {
                warn!(key, error = %e, "cache connection failed");
                return None;
            }
        };

        match serde_json::from_str(&raw?) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable cache entry");
                None
            }
        }
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
        let Some(client) = self.enabled() else {
            return;
        };
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "cache entry not serializable");
                return;
            }
        };

        let result = match client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                redis::cmd("SET")
                    .arg(key)
                    .arg(json)
                    .arg("EX")
                    .arg(self.ttl.as_secs())
                    .query_async::<_, ()>(&mut conn)
                    .await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(key, error = %e, "cache write failed");
        }
    }
}
