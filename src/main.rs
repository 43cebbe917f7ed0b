//! Billsplit server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use billsplit::adapters::http::session::{session_routes, SessionApi};
use billsplit::adapters::redis::RedisSessionStore;
use billsplit::config::AppConfig;
use billsplit::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store: Arc<dyn SessionStore> = Arc::new(RedisSessionStore::new(
        &config.redis.url,
        config.session.retention(),
        config.redis.timeout(),
    )?);

    // Fail fast on obvious misconfiguration, but keep serving: storage may
    // come up after us, and every handler degrades to 503 until it does.
    if let Err(e) = store.health_check().await {
        tracing::warn!(error = %e, "session storage not reachable at startup");
    }

    let cors = {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        if origins.is_empty() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = session_routes(SessionApi::new(store))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "billsplit listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
