//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DeleteSessionResponse, ErrorResponse, HealthResponse, SessionDataResponse,
    SessionDetailResponse, WriteSessionRequest,
};
pub use handlers::SessionApi;
pub use routes::session_routes;
