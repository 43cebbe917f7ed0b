//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, delete_session, get_session, health, recognize_receipt, write_session,
    SessionApi,
};

/// Creates the session router with all endpoints.
pub fn session_routes(api: SessionApi) -> Router {
    Router::new()
        .route("/session/new", post(create_session))
        .route(
            "/session/:uuid",
            get(get_session).post(write_session).delete(delete_session),
        )
        .route("/session/:uuid/recognized", post(recognize_receipt))
        .route("/health", get(health))
        .with_state(api)
}
