use tokio::sync::mpsc;

/// One incremental recognition result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechEvent {
    /// Recognized text for this segment
    pub text: String,
    /// Final segments are committed to the transcript; interim segments
    /// replace the unconfirmed preview
    pub is_final: bool,
}

impl SpeechEvent {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech engine unavailable")]
    Unavailable,
    #[error("speech engine failed to start: {0}")]
    Start(String),
}

/// Continuous speech-to-text engine capability
///
/// `start` begins continuous, interim-enabled recognition and returns the
/// stream of partial results; recognition ends when the returned receiver is
/// dropped. Engine-internal errors are expected to be logged by the
/// implementation and must not end the stream.
pub trait SpeechEngine: Send + Sync {
    fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError>;

    /// Engine name for logging
    fn name(&self) -> &str;
}
