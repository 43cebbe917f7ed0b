//! Session coordinator: bridges the engine and the store, and owns the
//! auto-save discipline.
//!
//! Every local mutation goes through [`SessionCoordinator::apply`], which
//! restarts a debounce timer. A burst of edits therefore produces exactly
//! one write, carrying the state after the last edit. A failed background
//! save is logged and never rolls back local state; the session simply
//! stays ahead of storage until the next save succeeds.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::domain::split::SessionSnapshot;
use crate::ports::{SessionStore, StoreError};

/// Default quiet period after the last mutation before a save fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Orchestrates read/modify/write cycles for one session.
///
/// Single logical editor: the coordinator itself is not shared. Concurrent
/// editors of the same session id race at the store level and last write
/// wins; that is an accepted non-goal.
pub struct SessionCoordinator {
    store: Arc<dyn SessionStore>,
    session_id: SessionId,
    snapshot: SessionSnapshot,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SessionCoordinator {
    /// Opens a session, loading its snapshot or starting empty when the id
    /// is unknown.
    ///
    /// The debounce window comes from the caller (typically
    /// `SessionConfig::debounce()`); [`DEFAULT_DEBOUNCE`] matches the
    /// configuration default.
    ///
    /// # Errors
    ///
    /// - `Connection` / `InvalidData` from the store; `NotFound` is not an
    ///   error here (it means a fresh session)
    pub async fn open(
        store: Arc<dyn SessionStore>,
        session_id: SessionId,
        debounce: Duration,
    ) -> Result<Self, StoreError> {
        let snapshot = match store.get(&session_id).await {
            Ok(session) => session.into_snapshot(),
            Err(StoreError::NotFound) => SessionSnapshot::default(),
            Err(other) => return Err(other),
        };
        Ok(Self::with_debounce(store, session_id, snapshot, debounce))
    }

    /// Builds a coordinator around an already-loaded snapshot.
    pub fn with_debounce(
        store: Arc<dyn SessionStore>,
        session_id: SessionId,
        snapshot: SessionSnapshot,
        debounce: Duration,
    ) -> Self {
        Self {
            store,
            session_id,
            snapshot,
            debounce,
            pending: None,
        }
    }

    /// Returns the session id.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the current local snapshot, which may be ahead of storage.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// True while a debounced save is scheduled but has not fired.
    pub fn save_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Applies a mutation to the local snapshot and (re)schedules a save.
    ///
    /// A mutation arriving before the quiet period elapses cancels the
    /// pending timer and starts a new one.
    pub fn apply<F>(&mut self, mutate: F)
    where
        F: FnOnce(SessionSnapshot) -> SessionSnapshot,
    {
        let current = std::mem::take(&mut self.snapshot);
        self.snapshot = mutate(current);
        self.schedule_save();
    }

    /// Forces an immediate save of the current snapshot, cancelling any
    /// pending timer.
    ///
    /// # Errors
    ///
    /// - `Connection` if storage is unreachable
    pub async fn flush(&mut self) -> Result<Session, StoreError> {
        self.cancel_pending();
        self.store.save(&self.session_id, &self.snapshot).await
    }

    fn schedule_save(&mut self) {
        self.cancel_pending();

        let store = Arc::clone(&self.store);
        let session_id = self.session_id;
        let snapshot = self.snapshot.clone();
        let debounce = self.debounce;

        // The timer that survives until it fires is always the one armed by
        // the latest mutation, so the write carries the latest snapshot.
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(error) = store.save(&session_id, &snapshot).await {
                tracing::warn!(%session_id, %error, "debounced session save failed");
            }
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SessionCoordinator {
    /// Navigating away before the quiet period elapses drops the save.
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
