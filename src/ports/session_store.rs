//! Session store port.
//!
//! Contract for TTL-backed key-value persistence of session snapshots.
//! Implementations classify their failures into [`StoreError`] once, at the
//! adapter boundary, so the HTTP layer can map categories to status codes
//! without re-inspecting error internals.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::domain::split::SessionSnapshot;

/// Storage failure taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage unreachable. Surfaces to callers as service-unavailable.
    #[error("Session storage unreachable: {0}")]
    Connection(String),

    /// No session under the requested id. Terminal.
    #[error("Session not found")]
    NotFound,

    /// A stored payload failed to deserialize. Terminal.
    #[error("Stored session payload is malformed: {0}")]
    InvalidData(String),

    /// Anything unclassified. Logged with full context where it arises.
    #[error("Session storage error: {0}")]
    Unknown(String),
}

/// TTL-backed session persistence.
///
/// # Contract
///
/// - `save` is an upsert: it preserves `created_at` when the key already
///   exists, always refreshes `updated_at`, and re-arms the TTL to the full
///   retention window ("time since last touch", not "time since creation").
/// - Reads return consistent snapshots, never partial state.
/// - `delete` is idempotent and reports whether a key actually existed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the key is absent or expired
    /// - `InvalidData` if the stored payload does not deserialize
    /// - `Connection` if storage is unreachable
    async fn get(&self, id: &SessionId) -> Result<Session, StoreError>;

    /// Upserts a full snapshot, returning the stored session with its
    /// refreshed timestamps.
    ///
    /// # Errors
    ///
    /// - `Connection` if storage is unreachable
    async fn save(&self, id: &SessionId, snapshot: &SessionSnapshot)
        -> Result<Session, StoreError>;

    /// Deletes a session, reporting whether a key existed.
    ///
    /// # Errors
    ///
    /// - `Connection` if storage is unreachable
    async fn delete(&self, id: &SessionId) -> Result<bool, StoreError>;

    /// Lightweight liveness probe, used to fail fast before real work.
    async fn health_check(&self) -> Result<(), StoreError>;
}
