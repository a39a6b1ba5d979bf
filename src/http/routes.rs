use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/interviews/start", post(handlers::start_interview))
        .route("/interviews/:session_id", delete(handlers::abort_session))
        .route("/interviews/:session_id/submit", post(handlers::submit_test))
        // Recording cycle
        .route(
            "/interviews/:session_id/record/start",
            post(handlers::start_recording),
        )
        .route(
            "/interviews/:session_id/record/stop",
            post(handlers::stop_recording),
        )
        .route("/interviews/:session_id/retake", post(handlers::retake))
        .route("/interviews/:session_id/answer", post(handlers::submit_answer))
        // Question navigation
        .route(
            "/interviews/:session_id/question/next",
            post(handlers::next_question),
        )
        .route(
            "/interviews/:session_id/question/previous",
            post(handlers::previous_question),
        )
        // Queries
        .route(
            "/interviews/:session_id/status",
            get(handlers::session_status),
        )
        .route(
            "/interviews/:session_id/transcript",
            get(handlers::session_transcript),
        )
        // The screen frontend is served from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
