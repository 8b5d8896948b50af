//! Session middleware configuration.
//!
//! Carts are held in a bounded in-process `moka` cache. A session that sees
//! no request for [`SESSION_IDLE_SECONDS`] is evicted, and the least recently
//! used sessions go first once [`MAX_SESSIONS`] is reached. Carts are lost on
//! restart.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, session_store};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bazaar_session";

/// Idle time after which a cart is dropped (7 days).
pub const SESSION_IDLE_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound on live sessions held in memory.
pub const MAX_SESSIONS: u64 = 100_000;

/// Session store backed by a size- and idle-bounded `moka` cache.
#[derive(Debug, Clone)]
pub struct CartSessionStore {
    cache: Cache<Id, Record>,
}

impl CartSessionStore {
    /// Store holding at most `max_sessions`, each dropped after `idle`
    /// without access.
    #[must_use]
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Number of sessions currently held.
    ///
    /// Approximate until the cache's pending maintenance has run.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Whether no sessions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions now.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for CartSessionStore {
    fn default() -> Self {
        Self::new(MAX_SESSIONS, idle_duration())
    }
}

#[async_trait]
impl SessionStore for CartSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self.cache.get(session_id).await {
            Some(record) if record.expiry_date > OffsetDateTime::now_utc() => Ok(Some(record)),
            Some(_) => {
                self.cache.invalidate(session_id).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

fn idle_duration() -> Duration {
    Duration::from_secs(SESSION_IDLE_SECONDS.unsigned_abs())
}

/// Create the session layer over a [`CartSessionStore`].
///
/// Expiry slides with activity, so the cookie and the stored cart age out
/// together.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<CartSessionStore> {
    SessionManagerLayer::new(CartSessionStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_IDLE_SECONDS),
        ))
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn record(expires_in: tower_sessions::cookie::time::Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::default(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    fn store() -> CartSessionStore {
        CartSessionStore::new(10, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let store = store();
        let mut record = record(tower_sessions::cookie::time::Duration::hours(1));
        store.create(&mut record).await.unwrap();

        let loaded = store.load(&record.id).await.unwrap();
        assert_eq!(loaded.map(|r| r.id), Some(record.id));

        store.delete(&record.id).await.unwrap();
        assert!(store.load(&record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_record_is_dropped() {
        let store = store();
        let record = record(tower_sessions::cookie::time::Duration::seconds(-1));
        store.save(&record).await.unwrap();

        assert!(store.load(&record.id).await.unwrap().is_none());
        store.run_pending_tasks().await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let store = CartSessionStore::new(5, Duration::from_secs(60));
        for _ in 0..50 {
            let mut record = record(tower_sessions::cookie::time::Duration::hours(1));
            store.create(&mut record).await.unwrap();
        }
        store.run_pending_tasks().await;
        assert!(store.len() <= 5);
    }
}
