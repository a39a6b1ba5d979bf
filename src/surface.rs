use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle naming the container the session presents into
///
/// Passed to the fullscreen driver; the core never assumes a specific UI
/// toolkit behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the preview surface is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    /// Nothing bound
    Blank,
    /// Mirroring the live capture stream
    Live,
    /// Playing back a finalized artifact
    Playback,
}

/// Preview surface state for the active question
///
/// Live while recording; switches to playback with transport controls once
/// an artifact is finalized.
#[derive(Debug, Clone)]
pub struct PreviewSurface {
    id: SurfaceId,
    mode: PreviewMode,
    controls_enabled: bool,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self {
            id: SurfaceId::new(),
            mode: PreviewMode::Blank,
            controls_enabled: false,
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Bind the live capture stream; transport controls off.
    pub fn bind_live(&mut self) {
        self.mode = PreviewMode::Live;
        self.controls_enabled = false;
    }

    /// Switch to played-back artifact mode with transport controls.
    pub fn bind_playback(&mut self) {
        self.mode = PreviewMode::Playback;
        self.controls_enabled = true;
    }

    /// Unbind everything.
    pub fn clear(&mut self) {
        self.mode = PreviewMode::Blank;
        self.controls_enabled = false;
    }
}

impl Default for PreviewSurface {
    fn default() -> Self {
        Self::new()
    }
}
