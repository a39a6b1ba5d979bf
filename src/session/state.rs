use serde::{Deserialize, Serialize};
use std::fmt;

/// Recording phase of the active question
///
/// Exactly one value at any time; transitions happen only inside the session
/// controller's command handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingPhase {
    /// No recording cycle open
    Idle,
    /// A media/recorder/transcription triple is live
    Recording,
    /// A finalized artifact is pending submit-or-retake
    Recorded,
}

impl fmt::Display for RecordingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordingPhase::Idle => "idle",
            RecordingPhase::Recording => "recording",
            RecordingPhase::Recorded => "recorded",
        };
        f.write_str(name)
    }
}

/// Candidate-facing commands, one per affordance on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCommand {
    StartRecording,
    StopRecording,
    Retake,
    SubmitAnswer,
    NextQuestion,
    PreviousQuestion,
    SubmitTest,
    /// Unconditional teardown when the screen unmounts
    Abort,
}

impl fmt::Display for SessionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionCommand::StartRecording => "start-recording",
            SessionCommand::StopRecording => "stop-recording",
            SessionCommand::Retake => "retake",
            SessionCommand::SubmitAnswer => "submit-answer",
            SessionCommand::NextQuestion => "next-question",
            SessionCommand::PreviousQuestion => "previous-question",
            SessionCommand::SubmitTest => "submit-test",
            SessionCommand::Abort => "abort",
        };
        f.write_str(name)
    }
}

/// Why a command did not run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{command} rejected in {phase} state")]
    Rejected {
        phase: RecordingPhase,
        command: SessionCommand,
    },
    #[error("{command} rejected while a recording start is pending")]
    AcquisitionPending { command: SessionCommand },
    #[error("session is closed")]
    Closed,
}
