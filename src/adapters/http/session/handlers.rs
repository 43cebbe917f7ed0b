//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::SessionId;
use crate::domain::split::{RecognizedReceipt, SessionSnapshot};
use crate::ports::{SessionStore, StoreError};

use super::dto::{
    DeleteSessionResponse, ErrorResponse, HealthResponse, SessionDataResponse,
    SessionDetailResponse, WriteSessionRequest,
};

/// Shared state for the session routes.
#[derive(Clone)]
pub struct SessionApi {
    store: Arc<dyn SessionStore>,
}

impl SessionApi {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

/// POST /session/new - Create a fresh, empty session.
pub async fn create_session(State(api): State<SessionApi>) -> Response {
    let id = SessionId::new();
    match api.store.save(&id, &SessionSnapshot::default()).await {
        Ok(session) => {
            let response: SessionDataResponse = session.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// GET /session/:uuid - Read a session with its timestamps.
pub async fn get_session(State(api): State<SessionApi>, Path(uuid): Path<String>) -> Response {
    let id = match parse_session_id(&uuid) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match api.store.get(&id).await {
        Ok(session) => {
            let response: SessionDetailResponse = session.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// POST /session/:uuid - Full-snapshot overwrite.
pub async fn write_session(
    State(api): State<SessionApi>,
    Path(uuid): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let id = match parse_session_id(&uuid) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let request: WriteSessionRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Invalid session payload: {}", e))),
            )
                .into_response()
        }
    };

    match api.store.save(&id, &request.data).await {
        Ok(session) => {
            let response: SessionDataResponse = session.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// DELETE /session/:uuid - Remove a session.
pub async fn delete_session(State(api): State<SessionApi>, Path(uuid): Path<String>) -> Response {
    let id = match parse_session_id(&uuid) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match api.store.delete(&id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(DeleteSessionResponse {
                uuid: id.to_string(),
                success: true,
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Session not found")),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

/// POST /session/:uuid/recognized - Fold an OCR result into the session.
///
/// The recognized payload goes through the same engine operations as
/// manual entry; the new receipt is appended to the stored snapshot.
pub async fn recognize_receipt(
    State(api): State<SessionApi>,
    Path(uuid): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let id = match parse_session_id(&uuid) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let recognized: RecognizedReceipt = match serde_json::from_value(body) {
        Ok(recognized) => recognized,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Invalid recognized receipt payload: {}",
                    e
                ))),
            )
                .into_response()
        }
    };

    let session = match api.store.get(&id).await {
        Ok(session) => session,
        Err(e) => return store_error_response(e),
    };

    let snapshot = session.into_snapshot().add_receipt(recognized.into_receipt());
    match api.store.save(&id, &snapshot).await {
        Ok(session) => {
            let response: SessionDataResponse = session.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// GET /health - Storage liveness probe.
pub async fn health(State(api): State<SessionApi>) -> Response {
    match api.store.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// Validates the id strictly, before any storage access occurs.
fn parse_session_id(uuid: &str) -> Result<SessionId, Response> {
    SessionId::parse_strict(uuid).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("Invalid session id: {}", e))),
        )
            .into_response()
    })
}

/// Maps the store taxonomy to status codes, once, for every handler.
fn store_error_response(error: StoreError) -> Response {
    match error {
        StoreError::Connection(e) => {
            tracing::warn!(error = %e, "session storage unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Service unavailable, please retry later")),
            )
                .into_response()
        }
        StoreError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Session not found")),
        )
            .into_response(),
        StoreError::InvalidData(e) => {
            tracing::error!(error = %e, "stored session payload is malformed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Stored session data is unreadable")),
            )
                .into_response()
        }
        StoreError::Unknown(e) => {
            tracing::error!(error = %e, "unclassified session storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal error")),
            )
                .into_response()
        }
    }
}
