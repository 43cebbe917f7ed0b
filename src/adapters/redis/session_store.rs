//! Redis-backed session store.
//!
//! One multiplexed connection is established lazily on first use and shared
//! for the life of the process. Every failure is classified here, once:
//! transport problems become `StoreError::Connection`, undecodable payloads
//! become `StoreError::InvalidData`, and everything else lands in
//! `StoreError::Unknown`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::Session;
use crate::domain::split::SessionSnapshot;
use crate::ports::{SessionStore, StoreError};

/// Payload stored under each session key.
///
/// The session id is the key itself, so only the snapshot and timestamps
/// are serialized. `created_at` is carried forward on every overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    data: SessionSnapshot,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Redis implementation of [`SessionStore`].
pub struct RedisSessionStore {
    client: redis::Client,
    conn: OnceCell<MultiplexedConnection>,
    retention: Duration,
    connect_timeout: Duration,
}

impl RedisSessionStore {
    /// Creates a store against the given Redis URL.
    ///
    /// No connection is made here; the first operation connects, bounded by
    /// `connect_timeout` (typically `RedisConfig::timeout()`).
    ///
    /// # Errors
    ///
    /// - `Connection` if the URL does not parse
    pub fn new(
        url: &str,
        retention: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            retention,
            connect_timeout,
        })
    }

    fn key(id: &SessionId) -> String {
        format!("session:{}", id)
    }

    /// Returns a clone of the shared multiplexed connection, establishing
    /// it on first call.
    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let connect = self.client.get_multiplexed_tokio_connection();
                match tokio::time::timeout(self.connect_timeout, connect).await {
                    Ok(result) => result.map_err(|e| StoreError::Connection(e.to_string())),
                    Err(_) => Err(StoreError::Connection(format!(
                        "connection attempt exceeded {:?}",
                        self.connect_timeout
                    ))),
                }
            })
            .await?;
        Ok(conn.clone())
    }

    async fn load_record(
        &self,
        conn: &mut MultiplexedConnection,
        key: &str,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let raw: Option<String> = conn.get(key).await.map_err(classify)?;
        match raw {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StoreError::InvalidData(e.to_string())),
        }
    }
}

/// Maps a redis error into the store taxonomy.
fn classify(e: redis::RedisError) -> StoreError {
    if e.is_connection_refusal()
        || e.is_connection_dropped()
        || e.is_io_error()
        || e.is_timeout()
    {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Unknown(e.to_string())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: &SessionId) -> Result<Session, StoreError> {
        let mut conn = self.connection().await?;
        let record = self
            .load_record(&mut conn, &Self::key(id))
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(Session::reconstitute(
            *id,
            record.data,
            record.created_at,
            record.updated_at,
        ))
    }

    async fn save(
        &self,
        id: &SessionId,
        snapshot: &SessionSnapshot,
    ) -> Result<Session, StoreError> {
        let mut conn = self.connection().await?;
        let key = Self::key(id);

        // Preserve created_at across overwrites. A record that no longer
        // deserializes is replaced wholesale rather than failing the save.
        let created_at = match self.load_record(&mut conn, &key).await {
            Ok(Some(existing)) => existing.created_at,
            Ok(None) => Timestamp::now(),
            Err(StoreError::InvalidData(_)) => Timestamp::now(),
            Err(other) => return Err(other),
        };

        let now = Timestamp::now();
        let record = StoredRecord {
            data: snapshot.clone(),
            created_at,
            updated_at: now,
        };
        let json =
            serde_json::to_string(&record).map_err(|e| StoreError::Unknown(e.to_string()))?;

        // SET with EX re-arms the TTL on every write: retention is measured
        // from the last touch, not from creation.
        redis::cmd("SET")
            .arg(&key)
            .arg(json)
            .arg("EX")
            .arg(self.retention.as_secs())
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(classify)?;

        Ok(Session::reconstitute(*id, snapshot.clone(), created_at, now))
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.del(Self::key(id)).await.map_err(classify)?;
        Ok(removed > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(classify)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("retention", &self.retention)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}
