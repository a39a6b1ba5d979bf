use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Capture constraints requested from the device
///
/// Fixed per session: the screen records at a known resolution with audio
/// enabled, matching what the preview surface expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            audio: true,
        }
    }
}

/// One encoded chunk of the camera+microphone stream
#[derive(Debug, Clone)]
pub struct MediaChunk {
    /// Encoded bytes, opaque to everything but the preview surface
    pub bytes: Vec<u8>,
    /// Timestamp in milliseconds since the stream started
    pub timestamp_ms: u64,
}

/// Capture device acquisition failures
///
/// Both are non-fatal to the session: recording simply cannot start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("capture permission denied")]
    Denied,
    #[error("no capture device available")]
    Unavailable,
}

/// The live capture stream
///
/// At most one instance is alive per question attempt. The chunk receiver is
/// lent to the recorder; the release hook stops the producing device.
/// `release` is idempotent.
#[derive(Debug)]
pub struct MediaHandle {
    chunks: Option<mpsc::Receiver<MediaChunk>>,
    shutdown: Option<watch::Sender<bool>>,
}

impl MediaHandle {
    pub fn new(chunks: mpsc::Receiver<MediaChunk>, shutdown: watch::Sender<bool>) -> Self {
        Self {
            chunks: Some(chunks),
            shutdown: Some(shutdown),
        }
    }

    /// Take the chunk stream to lend it to the recorder.
    ///
    /// Returns `None` if already lent out or released.
    pub fn take_chunks(&mut self) -> Option<mpsc::Receiver<MediaChunk>> {
        self.chunks.take()
    }

    /// Stop the producing device and drop the stream. Safe to call twice.
    pub fn release(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
            debug!("media handle released");
        }
        self.chunks = None;
    }

    pub fn is_released(&self) -> bool {
        self.shutdown.is_none()
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        // A leaked handle keeps the camera indicator lit
        self.release();
    }
}

/// Capture device capability interface
///
/// Platform integrations (a real webcam, a browser bridge) implement this
/// trait; the crate ships `SyntheticCamera` for demos and tests.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire the camera+microphone stream under the given constraints
    async fn acquire(&self, constraints: &CaptureConstraints)
        -> Result<MediaHandle, CaptureError>;

    /// Device name for logging
    fn name(&self) -> &str;
}

/// Capability-gated manager for the capture device
///
/// Holds the optional device plus the session's fixed constraints. An absent
/// device reports `Unavailable` without surfacing an error to the candidate.
#[derive(Clone)]
pub struct CaptureManager {
    device: Option<Arc<dyn CaptureDevice>>,
    constraints: CaptureConstraints,
}

impl CaptureManager {
    pub fn new(device: Option<Arc<dyn CaptureDevice>>, constraints: CaptureConstraints) -> Self {
        Self {
            device,
            constraints,
        }
    }

    pub fn is_available(&self) -> bool {
        self.device.is_some()
    }

    pub fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    /// Acquire a new media handle from the underlying device
    pub async fn acquire(&self) -> Result<MediaHandle, CaptureError> {
        let device = self.device.as_ref().ok_or(CaptureError::Unavailable)?;

        let handle = device.acquire(&self.constraints).await?;
        info!(
            "capture stream acquired from {} ({}x{}, audio={})",
            device.name(),
            self.constraints.width,
            self.constraints.height,
            self.constraints.audio
        );
        Ok(handle)
    }

    /// Release the handle in `slot`, if any. Idempotent; tolerates `None`
    /// and handles that were already released.
    pub fn release(&self, slot: &mut Option<MediaHandle>) {
        if let Some(mut handle) = slot.take() {
            handle.release();
        }
    }
}
