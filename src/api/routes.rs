//! API Routes
//!
//! Configures the Axum router with all cache admin endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bust_all_handler, bust_handler, config_handler, entries_handler, has_handler, health_handler,
    insert_handler, lookup_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/lookup", post(lookup_handler))
        .route("/has", post(has_handler))
        .route("/bust", post(bust_handler))
        .route(
            "/entries",
            get(entries_handler)
                .put(insert_handler)
                .delete(bust_all_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/config", get(config_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
