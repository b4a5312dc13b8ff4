use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState, allow_any_origin: bool) -> Router {
    let cors = if allow_any_origin {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/locations", get(handlers::get_locations))
        .route("/predict", post(handlers::predict))
        .with_state(state)
        .layer(
            // outermost first; the request id must exist before the trace span
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}
