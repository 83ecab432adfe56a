pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_reset_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            post(handlers::handle_analyze_profile),
        )
        .route(
            "/api/v1/sessions/:id/profile/upload",
            post(handlers::handle_upload_profile),
        )
        .route(
            "/api/v1/sessions/:id/target",
            post(handlers::handle_analyze_target),
        )
        .route(
            "/api/v1/sessions/:id/profile/skills/:index",
            delete(handlers::handle_remove_profile_skill),
        )
        .route(
            "/api/v1/sessions/:id/target/skills/:index",
            delete(handlers::handle_remove_target_skill),
        )
        .with_state(state)
}
