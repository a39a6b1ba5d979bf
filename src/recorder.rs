use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::capture::MediaChunk;

/// The finalized recording of one completed cycle
///
/// Buffered chunks concatenated in arrival order; superseded (discarded) on
/// retake. Becomes the preview surface's playback source.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub chunk_count: usize,
    pub duration_ms: u64,
}

/// Lightweight artifact descriptor for snapshots and answer records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub mime_type: String,
    pub byte_len: usize,
    pub chunk_count: usize,
    pub duration_ms: u64,
}

impl From<&Artifact> for ArtifactInfo {
    fn from(artifact: &Artifact) -> Self {
        Self {
            mime_type: artifact.mime_type.clone(),
            byte_len: artifact.bytes.len(),
            chunk_count: artifact.chunk_count,
            duration_ms: artifact.duration_ms,
        }
    }
}

/// Buffers encoded chunks from a live stream and finalizes them into one
/// [`Artifact`] on stop
///
/// Exactly one recorder lifecycle may be open at a time; the session
/// controller enforces that with its single recorder slot. `stop` is
/// idempotent, and a recorder whose stream ends early simply finalizes
/// whatever arrived.
pub struct Recorder {
    task: Option<JoinHandle<Vec<MediaChunk>>>,
    stop: Option<watch::Sender<bool>>,
    mime_type: String,
}

impl Recorder {
    /// Start buffering chunks from the stream receiver.
    pub fn start(mut chunks: mpsc::Receiver<MediaChunk>, mime_type: &str) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut buffered: Vec<MediaChunk> = Vec::new();

            loop {
                tokio::select! {
                    maybe = chunks.recv() => match maybe {
                        Some(chunk) => buffered.push(chunk),
                        // Stream released upstream; nothing more will arrive
                        None => break,
                    },
                    _ = stop_rx.changed() => break,
                }
            }

            // Drain chunks that were already queued when stop arrived so the
            // artifact reflects everything delivered in order
            while let Ok(chunk) = chunks.try_recv() {
                buffered.push(chunk);
            }

            buffered
        });

        Self {
            task: Some(task),
            stop: Some(stop_tx),
            mime_type: mime_type.to_string(),
        }
    }

    /// Whether the recorder lifecycle is still open
    pub fn is_open(&self) -> bool {
        self.task.is_some()
    }

    /// Finalize the recording.
    ///
    /// Concatenates the buffered chunks into one artifact. Idempotent: a
    /// second call (or a call on a recorder that never buffered anything)
    /// returns `Ok(None)` without error.
    pub async fn stop(&mut self) -> Result<Option<Artifact>> {
        let Some(task) = self.task.take() else {
            return Ok(None);
        };

        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
        }

        let buffered = task.await.context("recorder task panicked")?;

        let chunk_count = buffered.len();
        let duration_ms = buffered.last().map(|c| c.timestamp_ms).unwrap_or(0);
        let total_len: usize = buffered.iter().map(|c| c.bytes.len()).sum();

        let mut bytes = Vec::with_capacity(total_len);
        for chunk in &buffered {
            bytes.extend_from_slice(&chunk.bytes);
        }

        if chunk_count == 0 {
            warn!("recorder finalized with no buffered chunks");
        } else {
            info!(
                "recording finalized: {} chunks, {} bytes, {:.1}s",
                chunk_count,
                bytes.len(),
                duration_ms as f64 / 1000.0
            );
        }

        Ok(Some(Artifact {
            bytes,
            mime_type: self.mime_type.clone(),
            chunk_count,
            duration_ms,
        }))
    }

    /// Tear the recorder down without keeping the artifact.
    pub async fn discard(&mut self) {
        if let Err(e) = self.stop().await {
            warn!("failed to finalize recorder during teardown: {}", e);
        }
    }
}
