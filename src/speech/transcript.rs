use super::engine::SpeechEvent;

/// Accumulated transcript for the current question
///
/// Final segments append (space-separated); the latest interim segment
/// replaces the unconfirmed preview. Both buffers are scoped to the current
/// question and recording attempt: the controller clears them on question
/// change and on every recording restart.
#[derive(Debug, Clone, Default)]
pub struct TranscriptBuffer {
    committed: String,
    interim: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one recognition result into the buffers.
    pub fn apply(&mut self, event: &SpeechEvent) {
        if event.is_final {
            if !self.committed.is_empty() {
                self.committed.push(' ');
            }
            self.committed.push_str(&event.text);
            // The interim preview was a preview of this now-committed text
            self.interim.clear();
        } else {
            self.interim = event.text.clone();
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.interim.is_empty()
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.interim.clear();
    }
}
