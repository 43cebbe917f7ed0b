//! In-memory session store.
//!
//! Honors the same created/updated/TTL contract as the Redis adapter, with
//! TTL bookkeeping done lazily at read time. Useful for tests and local
//! development; never for production.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::Session;
use crate::domain::split::SessionSnapshot;
use crate::ports::{SessionStore, StoreError};

const DEFAULT_RETENTION: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct StoredSession {
    snapshot: SessionSnapshot,
    created_at: Timestamp,
    updated_at: Timestamp,
    expires_at: Timestamp,
}

/// In-memory implementation of [`SessionStore`].
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
    retention: Duration,
    save_count: Arc<RwLock<usize>>,
}

impl InMemorySessionStore {
    /// Creates a store with the default 30-day retention window.
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Creates a store with a custom retention window.
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            retention,
            save_count: Arc::new(RwLock::new(0)),
        }
    }

    /// Number of stored sessions, expired entries included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Total successful `save` calls. Used by debounce tests.
    pub async fn save_count(&self) -> usize {
        *self.save_count.read().await
    }

    /// Clears all stored data.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
        *self.save_count.write().await = 0;
    }

    fn expiry_from_now(&self) -> Timestamp {
        let ttl = ChronoDuration::from_std(self.retention)
            .unwrap_or_else(|_| ChronoDuration::days(30));
        Timestamp::from_datetime(Utc::now() + ttl)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Session, StoreError> {
        let sessions = self.sessions.read().await;
        let stored = sessions.get(id).ok_or(StoreError::NotFound)?;
        if stored.expires_at < Timestamp::now() {
            return Err(StoreError::NotFound);
        }
        Ok(Session::reconstitute(
            *id,
            stored.snapshot.clone(),
            stored.created_at,
            stored.updated_at,
        ))
    }

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &SessionSnapshot,
    ) -> Result<Session, StoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        // An expired entry is gone as far as callers can tell, so it does
        // not donate its created_at to the new session either.
        let created_at = sessions
            .get(id)
            .filter(|existing| existing.expires_at >= now)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        sessions.insert(
            *id,
            StoredSession {
                snapshot: snapshot.clone(),
                created_at,
                updated_at: now,
                expires_at: self.expiry_from_now(),
            },
        );
        drop(sessions);
        *self.save_count.write().await += 1;
        Ok(Session::reconstitute(*id, snapshot.clone(), created_at, now))
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::{Person, WorkflowStep};

    #[tokio::test]
    async fn get_missing_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let result = store.get(&SessionId::new()).await;
        assert_eq!(result.unwrap_err(), StoreError::NotFound);
    }

    #[tokio::test]
    async fn save_then_get_round_trips_the_snapshot() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        let snapshot = SessionSnapshot::default()
            .add_person(Person::new("Ada", "#f00"))
            .with_step(WorkflowStep::Input);

        store.save(&id, &snapshot).await.unwrap();
        let loaded = store.get(&id).await.unwrap();
        assert_eq!(loaded.snapshot(), &snapshot);
    }

    #[tokio::test]
    async fn second_save_preserves_created_at_and_refreshes_updated_at() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        let snapshot = SessionSnapshot::default();

        let first = store.save(&id, &snapshot).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.save(&id, &snapshot).await.unwrap();

        assert_eq!(first.created_at(), second.created_at());
        assert!(second.updated_at() > first.updated_at());
    }

    #[tokio::test]
    async fn expired_sessions_read_as_not_found() {
        let store = InMemorySessionStore::with_retention(Duration::from_millis(0));
        let id = SessionId::new();
        store.save(&id, &SessionSnapshot::default()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(store.get(&id).await.unwrap_err(), StoreError::NotFound);
    }

    #[tokio::test]
    async fn save_after_expiry_starts_a_fresh_created_at() {
        let store = InMemorySessionStore::with_retention(Duration::from_millis(0));
        let id = SessionId::new();
        let first = store.save(&id, &SessionSnapshot::default()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let second = store.save(&id, &SessionSnapshot::default()).await.unwrap();
        assert!(second.created_at() > first.created_at());
        assert_eq!(second.created_at(), second.updated_at());
    }

    #[tokio::test]
    async fn save_within_retention_keeps_session_alive() {
        let store = InMemorySessionStore::with_retention(Duration::from_secs(60));
        let id = SessionId::new();
        store.save(&id, &SessionSnapshot::default()).await.unwrap();
        store.save(&id, &SessionSnapshot::default()).await.unwrap();
        assert!(store.get(&id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_key_existed() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        store.save(&id, &SessionSnapshot::default()).await.unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn health_check_always_passes() {
        let store = InMemorySessionStore::new();
        assert!(store.health_check().await.is_ok());
    }
}
