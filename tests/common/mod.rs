// Shared fixtures for session integration tests: scripted capability
// implementations standing in for the real camera, speech engine, and
// fullscreen shell. Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use viva_screen::{
    Capabilities, CaptureConstraints, CaptureDevice, CaptureError, FullscreenDriver,
    FullscreenError, MediaChunk, MediaHandle, RecordingPhase, SessionConfig, SessionController,
    SessionHandle, SessionSnapshot, SpeechEngine, SpeechError, SpeechEvent, SurfaceId,
    SyntheticCamera,
};

/// Capture device that always refuses acquisition
pub struct DeniedCamera;

#[async_trait::async_trait]
impl CaptureDevice for DeniedCamera {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<MediaHandle, CaptureError> {
        Err(CaptureError::Denied)
    }

    fn name(&self) -> &str {
        "denied-camera"
    }
}

/// Capture device that counts live streams and can delay acquisition
///
/// The counter goes up when a stream starts producing and back down when the
/// stream is released (or its consumer goes away), which makes leaked
/// handles visible to tests.
pub struct TrackingCamera {
    pub active: Arc<AtomicUsize>,
    pub acquire_delay: Duration,
}

impl TrackingCamera {
    pub fn new(acquire_delay: Duration) -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            acquire_delay,
        }
    }
}

#[async_trait::async_trait]
impl CaptureDevice for TrackingCamera {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<MediaHandle, CaptureError> {
        if !self.acquire_delay.is_zero() {
            tokio::time::sleep(self.acquire_delay).await;
        }

        let (chunk_tx, chunk_rx) = mpsc::channel(16);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let active = Arc::clone(&self.active);
        active.fetch_add(1, Ordering::SeqCst);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(10));
            let mut sequence: u64 = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let chunk = MediaChunk {
                            bytes: vec![sequence as u8; 8],
                            timestamp_ms: sequence * 10,
                        };
                        sequence += 1;
                        if chunk_tx.send(chunk).await.is_err() {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }

            active.fetch_sub(1, Ordering::SeqCst);
        });

        Ok(MediaHandle::new(chunk_rx, shutdown_tx))
    }

    fn name(&self) -> &str {
        "tracking-camera"
    }
}

/// Speech engine replaying a fixed script of recognition results
pub struct ScriptedEngine {
    events: Vec<SpeechEvent>,
}

impl ScriptedEngine {
    pub fn new(events: Vec<SpeechEvent>) -> Self {
        Self { events }
    }
}

impl SpeechEngine for ScriptedEngine {
    fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError> {
        let (tx, rx) = mpsc::channel(32);
        let events = self.events.clone();
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }

    fn name(&self) -> &str {
        "scripted-engine"
    }
}

/// Fullscreen driver that records enter/exit calls and can reject entry
pub struct CountingFullscreen {
    pub enters: Arc<AtomicUsize>,
    pub exits: Arc<AtomicUsize>,
    reject: bool,
}

impl CountingFullscreen {
    pub fn new() -> Self {
        Self {
            enters: Arc::new(AtomicUsize::new(0)),
            exits: Arc::new(AtomicUsize::new(0)),
            reject: false,
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }
}

#[async_trait::async_trait]
impl FullscreenDriver for CountingFullscreen {
    async fn enter(&self, _surface: SurfaceId) -> Result<(), FullscreenError> {
        if self.reject {
            return Err(FullscreenError::Rejected("test rejection".to_string()));
        }
        self.enters.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn exit(&self) -> Result<(), FullscreenError> {
        self.exits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "counting-fullscreen"
    }
}

/// Capabilities with a fast synthetic camera, a scripted engine, and a
/// permissive fullscreen driver
pub fn full_capabilities(script: Vec<SpeechEvent>) -> Capabilities {
    Capabilities {
        capture: Some(Arc::new(SyntheticCamera::new(Duration::from_millis(10), 64))),
        speech: Some(Arc::new(ScriptedEngine::new(script))),
        fullscreen: Some(Arc::new(CountingFullscreen::new())),
    }
}

pub fn spawn_session(capabilities: Capabilities) -> SessionHandle {
    SessionController::spawn(SessionConfig::new("java-screening"), capabilities)
}

/// Poll the session until the snapshot satisfies `pred` (3s cap).
pub async fn wait_until<F>(handle: &SessionHandle, mut pred: F) -> SessionSnapshot
where
    F: FnMut(&SessionSnapshot) -> bool,
{
    for _ in 0..300 {
        let snapshot = handle.status().await.expect("session closed while waiting");
        if pred(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session never reached the expected state");
}

pub async fn wait_for_phase(handle: &SessionHandle, phase: RecordingPhase) -> SessionSnapshot {
    wait_until(handle, |s| s.phase == phase).await
}
