use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use super::device::{CaptureConstraints, CaptureDevice, CaptureError, MediaChunk, MediaHandle};

/// In-process capture device emitting synthetic encoded chunks
///
/// Stands in for a real camera in local runs and integration tests: a tokio
/// task produces a timestamped chunk every `chunk_interval` until the handle
/// is released.
pub struct SyntheticCamera {
    chunk_interval: Duration,
    chunk_bytes: usize,
}

impl SyntheticCamera {
    pub fn new(chunk_interval: Duration, chunk_bytes: usize) -> Self {
        Self {
            chunk_interval,
            chunk_bytes,
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self {
            chunk_interval: Duration::from_millis(200),
            chunk_bytes: 4096,
        }
    }
}

#[async_trait::async_trait]
impl CaptureDevice for SyntheticCamera {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<MediaHandle, CaptureError> {
        let (chunk_tx, chunk_rx) = mpsc::channel(64);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let interval_ms = self.chunk_interval.as_millis() as u64;
        let chunk_bytes = self.chunk_bytes;
        let period = self.chunk_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            let mut sequence: u64 = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let chunk = MediaChunk {
                            bytes: vec![(sequence % 251) as u8; chunk_bytes],
                            timestamp_ms: sequence * interval_ms,
                        };
                        sequence += 1;

                        if chunk_tx.send(chunk).await.is_err() {
                            // Receiver dropped; nobody is recording anymore
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            debug!("synthetic camera stopped after {} chunks", sequence);
        });

        Ok(MediaHandle::new(chunk_rx, shutdown_tx))
    }

    fn name(&self) -> &str {
        "synthetic-camera"
    }
}
