pub mod capture;
pub mod config;
pub mod fullscreen;
pub mod http;
pub mod questions;
pub mod recorder;
pub mod session;
pub mod speech;
pub mod surface;

pub use capture::{
    CaptureConstraints, CaptureDevice, CaptureError, CaptureManager, MediaChunk, MediaHandle,
    SyntheticCamera,
};
pub use config::Config;
pub use fullscreen::{FullscreenDriver, FullscreenError, FullscreenGuard};
pub use http::{create_router, AppState};
pub use questions::{default_question_set, Question, QuestionNavigator, Step};
pub use recorder::{Artifact, ArtifactInfo, Recorder};
pub use session::{
    AnswerRecord, Capabilities, CommandOutcome, RecordingPhase, SessionCommand, SessionConfig,
    SessionController, SessionError, SessionHandle, SessionSnapshot, SessionSummary,
};
pub use speech::{SpeechEngine, SpeechError, SpeechEvent, Transcriber, TranscriptBuffer};
pub use surface::{PreviewMode, PreviewSurface, SurfaceId};
