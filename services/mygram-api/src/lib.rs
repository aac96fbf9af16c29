//! MyGram API
//!
//! Photo-sharing HTTP service.
//!
//! ## Public Endpoints
//!
//! - `POST /register` - Create an account
//! - `POST /login` - Exchange email and password for a bearer token
//!
//! ## Authenticated Endpoints
//!
//! - `PUT /api/users`, `DELETE /api/users` - Manage the caller's account
//! - `GET|POST /api/photos`, `PUT|DELETE /api/photos/{photoId}`
//! - `GET|POST /api/comments`, `PUT|DELETE /api/comments/{commentId}`
//! - `GET|POST /api/socialmedias`, `PUT|DELETE /api/socialmedias/{socialMediaId}`
//!
//! `PUT` and `DELETE` on a resource are allowed only for its owner.
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use crate::config::{Config, ConfigError};
pub use crate::state::AppState;

/// Build the HTTP router with middleware
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Public account routes
    let public = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login));

    // Authenticated routes
    let api = Router::new()
        .route(
            "/users",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route(
            "/photos",
            get(handlers::list_photos).post(handlers::create_photo),
        )
        .route(
            "/photos/{photoId}",
            put(handlers::update_photo).delete(handlers::delete_photo),
        )
        .route(
            "/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/comments/{commentId}",
            put(handlers::update_comment).delete(handlers::delete_comment),
        )
        .route(
            "/socialmedias",
            get(handlers::list_social_medias).post(handlers::create_social_media),
        )
        .route(
            "/socialmedias/{socialMediaId}",
            put(handlers::update_social_media).delete(handlers::delete_social_media),
        );

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(timeout_layer(request_timeout));

    Router::new()
        .merge(public)
        .nest("/api", api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

/// Slow requests are answered with 408 instead of being left open
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Install the Prometheus recorder and describe the service's metrics
pub fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(
        "mygram_auth_failures_total",
        "Rejected bearer tokens by reason"
    );
    metrics::describe_counter!(
        "mygram_authorization_decisions_total",
        "Ownership checks by resource kind and decision"
    );
    metrics::describe_counter!("mygram_logins_total", "Login attempts by result");

    Ok(handle)
}
