pub mod health;

use axum::{routing::get, Router};

use crate::render::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_page))
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(handlers::handle_roles))
        .route("/api/v1/render", get(handlers::handle_render))
        .route("/api/v1/view", get(handlers::handle_view))
        .with_state(state)
}
