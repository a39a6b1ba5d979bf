use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::state::AppState;
use crate::questions::Question;
use crate::session::{
    CommandOutcome, SessionCommand, SessionConfig, SessionController, SessionError,
    SessionHandle, SessionSnapshot,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    /// Identifier of the selected test (if not provided, generate one)
    pub test_id: Option<String>,

    /// Ordered question list; omitted means the built-in default set
    pub questions: Option<Vec<Question>>,
}

#[derive(Debug, Serialize)]
pub struct StartInterviewResponse {
    pub session_id: Uuid,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub outcome: CommandOutcome,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub transcript: String,
    pub interim: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// POST /interviews/start
/// Start a new screening session for a test
pub async fn start_interview(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> impl IntoResponse {
    let test_id = req
        .test_id
        .unwrap_or_else(|| format!("test-{}", Uuid::new_v4()));

    info!("starting screening session for test: {}", test_id);

    let mut config = SessionConfig::new(test_id);
    config.constraints = state.constraints.clone();
    config.listing_route = state.listing_route.clone();
    if let Some(questions) = req.questions {
        config = config.with_questions(questions);
    }

    let handle = SessionController::spawn(config, state.capabilities.clone());
    let session_id = handle.id();

    let snapshot = match handle.status().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("session {} unreachable right after spawn: {}", session_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("failed to start session: {}", e),
                }),
            )
                .into_response();
        }
    };

    state.sessions.write().await.insert(session_id, handle);

    (
        StatusCode::OK,
        Json(StartInterviewResponse {
            session_id,
            snapshot,
        }),
    )
        .into_response()
}

/// POST /interviews/:session_id/record/start
pub async fn start_recording(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::StartRecording).await
}

/// POST /interviews/:session_id/record/stop
pub async fn stop_recording(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::StopRecording).await
}

/// POST /interviews/:session_id/retake
pub async fn retake(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::Retake).await
}

/// POST /interviews/:session_id/answer
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::SubmitAnswer).await
}

/// POST /interviews/:session_id/question/next
pub async fn next_question(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::NextQuestion).await
}

/// POST /interviews/:session_id/question/previous
pub async fn previous_question(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::PreviousQuestion).await
}

/// POST /interviews/:session_id/submit
pub async fn submit_test(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::SubmitTest).await
}

/// DELETE /interviews/:session_id
/// Unconditional teardown when the screen unmounts
pub async fn abort_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    run_command(&state, session_id, SessionCommand::Abort).await
}

/// GET /interviews/:session_id/status
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(handle) = lookup(&state, session_id).await else {
        return not_found(session_id);
    };

    match handle.status().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(CommandResponse {
                session_id,
                outcome: CommandOutcome {
                    snapshot,
                    answer: None,
                    summary: None,
                    redirect: None,
                },
            }),
        )
            .into_response(),
        Err(e) => closed(&state, session_id, e).await,
    }
}

/// GET /interviews/:session_id/transcript
pub async fn session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(handle) = lookup(&state, session_id).await else {
        return not_found(session_id);
    };

    match handle.status().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(TranscriptResponse {
                session_id,
                transcript: snapshot.transcript,
                interim: snapshot.interim,
            }),
        )
            .into_response(),
        Err(e) => closed(&state, session_id, e).await,
    }
}

// ============================================================================
// Shared plumbing
// ============================================================================

async fn lookup(state: &AppState, session_id: Uuid) -> Option<SessionHandle> {
    state.sessions.read().await.get(&session_id).cloned()
}

fn not_found(session_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("session {} not found", session_id),
        }),
    )
        .into_response()
}

async fn closed(
    state: &AppState,
    session_id: Uuid,
    error: SessionError,
) -> axum::response::Response {
    state.sessions.write().await.remove(&session_id);
    (
        StatusCode::GONE,
        Json(ErrorResponse {
            error: format!("session {}: {}", session_id, error),
        }),
    )
        .into_response()
}

async fn run_command(
    state: &AppState,
    session_id: Uuid,
    command: SessionCommand,
) -> axum::response::Response {
    let Some(handle) = lookup(state, session_id).await else {
        return not_found(session_id);
    };

    match handle.command(command).await {
        Ok(outcome) => {
            // Terminal commands retire the session from the map
            if matches!(
                command,
                SessionCommand::SubmitTest | SessionCommand::Abort
            ) {
                state.sessions.write().await.remove(&session_id);
            }
            (
                StatusCode::OK,
                Json(CommandResponse {
                    session_id,
                    outcome,
                }),
            )
                .into_response()
        }
        Err(e @ SessionError::Rejected { .. })
        | Err(e @ SessionError::AcquisitionPending { .. }) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ SessionError::Closed) => closed(state, session_id, e).await,
    }
}
