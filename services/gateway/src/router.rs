use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use dealgate_core::health::{healthz, readyz};
use dealgate_core::middleware::request_id_layer;

use crate::guard::route_guard;
use crate::handlers::auth::{logout, request_code, verify_code};
use crate::handlers::proxy::forward;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth flow
        .route("/auth/otp", post(request_code))
        .route("/auth/session", post(verify_code))
        .route("/auth/session", delete(logout))
        // Backend passthrough
        .route(
            "/proxy/{*path}",
            get(forward).post(forward).put(forward).delete(forward),
        )
        .with_state(state)
        // Layers run outermost-last: trace → request-id → guard → routes.
        .layer(middleware::from_fn(route_guard))
        .layer(request_id_layer())
        .layer(TraceLayer::new_for_http())
}
