pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_basic_auth;
use crate::pipeline::handlers as pipeline;
use crate::render::handlers as render;
use crate::state::AppState;

/// Job descriptions plus comparators arrive as JSON text; allow up to 10 MB.
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Everything under /api sits behind the basic-auth gate.
    let api = Router::new()
        .route("/auth-test", get(pipeline::handle_auth_test))
        .route("/analyze", post(pipeline::handle_analyze))
        .route("/render/preview", post(render::handle_preview))
        .route("/render/table", post(render::handle_table))
        .route("/export/:format", post(render::handle_export))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
