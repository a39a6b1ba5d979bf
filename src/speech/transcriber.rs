use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::engine::{SpeechEngine, SpeechEvent};

/// Capability-gated wrapper around the speech engine
///
/// Owns at most one live recognition subscription. `start` forwards every
/// engine event into the caller's delivery hook until `stop` (idempotent) or
/// until the engine ends the stream. Without an engine, `start` reports
/// `false` and transcription silently stays off.
pub struct Transcriber {
    engine: Option<Arc<dyn SpeechEngine>>,
    stop: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl Transcriber {
    pub fn new(engine: Option<Arc<dyn SpeechEngine>>) -> Self {
        Self {
            engine,
            stop: None,
            task: None,
        }
    }

    /// Whether a recognition engine is present at all (the no-op detection
    /// hook for degraded environments)
    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether a recognition subscription is currently live
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Begin continuous recognition, delivering each event through `deliver`.
    ///
    /// Any previous subscription is stopped first. Returns whether
    /// recognition actually started; a missing engine or a start failure is
    /// logged and degrades to `false` rather than erroring the session.
    pub fn start<F>(&mut self, mut deliver: F) -> bool
    where
        F: FnMut(SpeechEvent) + Send + 'static,
    {
        self.stop();

        let Some(engine) = self.engine.as_ref() else {
            debug!("no speech engine present; transcription disabled");
            return false;
        };

        let mut events = match engine.start() {
            Ok(events) => events,
            Err(e) => {
                warn!("speech engine {} failed to start: {}", engine.name(), e);
                return false;
            }
        };

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    maybe = events.recv() => match maybe {
                        Some(event) => deliver(event),
                        // Engine closed its stream
                        None => break,
                    },
                    _ = stop_rx.changed() => break,
                }
            }
        });

        debug!("recognition started on {}", engine.name());
        self.stop = Some(stop_tx);
        self.task = Some(task);
        true
    }

    /// Halt recognition. Idempotent; a no-op when nothing is running.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
        }
        // The forward task exits on the stop signal; detaching it is enough
        self.task = None;
    }
}
