//! HTTP API for the external route/navigation collaborator
//!
//! This module provides the REST surface that drives screening sessions:
//! - POST /interviews/start - Start a session for a test
//! - POST /interviews/:id/record/start|stop, /retake, /answer - Recording cycle
//! - POST /interviews/:id/question/next|previous - Question navigation
//! - POST /interviews/:id/submit - Submit the test (terminal)
//! - DELETE /interviews/:id - Abort/unmount teardown
//! - GET /interviews/:id/status, /transcript - Queries
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
