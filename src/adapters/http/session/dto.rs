//! HTTP DTOs for session endpoints.
//!
//! Envelopes decouple the wire shape from domain types. Every response
//! carries a `success` flag; error bodies never leak partial session state.

use serde::{Deserialize, Serialize};

use crate::domain::session::Session;
use crate::domain::split::SessionSnapshot;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /session/{uuid}`: a full-snapshot overwrite.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteSessionRequest {
    pub data: SessionSnapshot,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for create/write/recognize operations.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDataResponse {
    pub uuid: String,
    pub data: SessionSnapshot,
    pub success: bool,
}

impl From<Session> for SessionDataResponse {
    fn from(session: Session) -> Self {
        Self {
            uuid: session.id().to_string(),
            data: session.into_snapshot(),
            success: true,
        }
    }
}

/// Response for `GET /session/{uuid}`, timestamps included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailResponse {
    pub uuid: String,
    pub data: SessionSnapshot,
    pub created_at: String,
    pub updated_at: String,
    pub success: bool,
}

impl From<Session> for SessionDetailResponse {
    fn from(session: Session) -> Self {
        Self {
            uuid: session.id().to_string(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
            data: session.into_snapshot(),
            success: true,
        }
    }
}

/// Response for `DELETE /session/{uuid}`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteSessionResponse {
    pub uuid: String,
    pub success: bool,
}

/// Standard error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
