use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_status))
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/api/movies", get(handlers::get_movies))
        // Filter options, also served at the asset path the frontend requests
        .route("/api/filter-options", get(handlers::get_filter_options))
        .route("/filter-options.json", get(handlers::get_filter_options))
        // Recommendations
        .route("/api/recommendations", post(handlers::recommend))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
