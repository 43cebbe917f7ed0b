//! Session record: a persisted snapshot plus its lifecycle timestamps.

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::split::SessionSnapshot;

/// A stored bill-splitting session.
///
/// # Lifecycle
///
/// - Created empty on the first request for a fresh id.
/// - Updated by full-snapshot overwrite; `created_at` is set once and
///   `updated_at` refreshes on every successful save.
/// - Expires when untouched for the retention window (TTL measured from
///   last write, not from creation); explicit delete is also supported.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    snapshot: SessionSnapshot,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a fresh, empty session.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            snapshot: SessionSnapshot::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a session from stored parts.
    pub fn reconstitute(
        id: SessionId,
        snapshot: SessionSnapshot,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            snapshot,
            created_at,
            updated_at,
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the persisted snapshot.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Consumes the session, yielding the snapshot.
    pub fn into_snapshot(self) -> SessionSnapshot {
        self.snapshot
    }

    /// Returns when the session was first created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last saved.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::WorkflowStep;

    #[test]
    fn new_session_is_empty_at_setup() {
        let session = Session::new(SessionId::new());
        assert!(session.snapshot().people.is_empty());
        assert!(session.snapshot().receipts.is_empty());
        assert_eq!(session.snapshot().current_step, WorkflowStep::Setup);
    }

    #[test]
    fn new_session_timestamps_start_equal() {
        let session = Session::new(SessionId::new());
        assert_eq!(session.created_at(), session.updated_at());
    }

    #[test]
    fn reconstitute_preserves_parts() {
        let id = SessionId::new();
        let created = Timestamp::now();
        let updated = Timestamp::now();
        let snapshot = SessionSnapshot::default().with_step(WorkflowStep::Assign);
        let session = Session::reconstitute(id, snapshot.clone(), created, updated);
        assert_eq!(session.id(), &id);
        assert_eq!(session.snapshot(), &snapshot);
        assert_eq!(session.created_at(), &created);
    }
}
