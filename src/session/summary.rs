use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::RecordingPhase;
use crate::questions::Question;
use crate::recorder::ArtifactInfo;
use crate::surface::PreviewMode;

/// One submitted answer, kept locally in the session summary
///
/// This is the local-acknowledgment boundary: nothing is persisted or
/// transmitted. A submission-upload collaborator would consume exactly this
/// record without touching the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub question_text: String,
    /// The accumulated final transcript at submit time
    pub transcript: String,
    pub recorded_at: DateTime<Utc>,
    pub artifact: Option<ArtifactInfo>,
}

/// Final summary handed back on SubmitTest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub test_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub questions_total: usize,
    pub answers: Vec<AnswerRecord>,
}

/// Point-in-time view of the session, the status payload for the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub test_id: String,
    pub phase: RecordingPhase,
    pub question_index: usize,
    pub question_total: usize,
    pub question: Question,
    pub transcript: String,
    pub interim: String,
    pub has_artifact: bool,
    pub preview: PreviewMode,
    pub preview_controls: bool,
    pub fullscreen_active: bool,
    pub capture_available: bool,
    pub speech_available: bool,
    /// Whether the next-question affordance is usable right now
    pub can_go_next: bool,
    /// Whether the submit-test affordance is usable right now
    pub can_submit_test: bool,
    pub answered: usize,
    /// Degraded-capability feedback for the candidate, when any
    pub notice: Option<String>,
}
