//! Screening session orchestration
//!
//! The session controller composes media capture, recording, transcription,
//! fullscreen presentation, and question navigation into the per-question
//! recording cycle:
//! - a single event-loop task owns all session state and resource slots
//! - candidate commands and subsystem completions share one ordered queue
//! - transition preconditions (not completion ordering) keep the composite
//!   state valid
//! - every teardown path is idempotent and unconditional

mod config;
mod controller;
mod handle;
mod state;
mod summary;

pub use config::SessionConfig;
pub use controller::{Capabilities, CommandOutcome, SessionController};
pub use handle::SessionHandle;
pub use state::{RecordingPhase, SessionCommand, SessionError};
pub use summary::{AnswerRecord, SessionSnapshot, SessionSummary};
