//! Speech transcription
//!
//! Wraps a continuous, interim-capable speech-to-text engine behind a
//! capability interface. Without an engine the transcriber is a detectable
//! no-op: the transcript stays empty and no error reaches the candidate.

mod engine;
mod transcriber;
mod transcript;

pub use engine::{SpeechEngine, SpeechError, SpeechEvent};
pub use transcriber::Transcriber;
pub use transcript::TranscriptBuffer;
