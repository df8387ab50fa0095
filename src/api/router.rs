use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes: no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics));

    // Protected API routes: Bearer token required when API_TOKEN is set
    let protected = Router::new()
        // Lookups
        .route("/api/check", post(handlers::check::check))
        .route("/api/scrape", post(handlers::scrape::scrape))
        // Threshold tracker
        .route("/api/thresholds", get(handlers::thresholds::list))
        .route(
            "/api/thresholds/:bin",
            get(handlers::thresholds::history).post(handlers::thresholds::record),
        )
        // Stored records
        .route("/api/records", get(handlers::records::list))
        .route("/api/records/export", get(handlers::records::export))
        .route("/api/records/:bin/history", get(handlers::records::history))
        // Live feed
        .route("/ws", get(handlers::ws::handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
