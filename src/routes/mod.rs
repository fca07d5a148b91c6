//! HTTP routes and router assembly

pub mod crop;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Build the application router
pub fn build_router(state: SharedState) -> Router {
    let config = &state.config;

    let mut router: Router<SharedState> = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Crop recommendation
        .route(&config.home_path(), get(crop::home))
        .route(&config.predict_path(), post(crop::predict));

    // Serve the form without the trailing slash as well
    if !config.route_prefix.is_empty() {
        router = router.route(&config.route_prefix, get(crop::home));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
