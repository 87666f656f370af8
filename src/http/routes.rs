use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/practice/sessions", post(handlers::open_session))
        .route(
            "/practice/sessions/:session_id",
            get(handlers::get_session).delete(handlers::close_session),
        )
        .route(
            "/practice/sessions/:session_id/one-line",
            post(handlers::set_one_line),
        )
        // Learner actions
        .route("/practice/sessions/:session_id/skip", post(handlers::skip))
        .route("/practice/sessions/:session_id/stop", post(handlers::stop))
        .route("/practice/sessions/:session_id/redo", post(handlers::redo))
        .route("/practice/sessions/:session_id/next", post(handlers::next))
        .route(
            "/practice/sessions/:session_id/previous",
            post(handlers::previous),
        )
        .route("/practice/sessions/:session_id/reset", post(handlers::reset))
        // Attempt history
        .route(
            "/practice/questions/:question_id/attempts",
            get(handlers::get_attempts),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
