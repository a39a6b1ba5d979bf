use std::sync::Arc;
use tracing::{debug, warn};

use crate::surface::SurfaceId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    #[error("fullscreen presentation not supported")]
    Unsupported,
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
}

/// Exclusive fullscreen presentation capability
///
/// Implemented by the hosting shell; absent in headless deployments.
#[async_trait::async_trait]
pub trait FullscreenDriver: Send + Sync {
    async fn enter(&self, surface: SurfaceId) -> Result<(), FullscreenError>;
    async fn exit(&self) -> Result<(), FullscreenError>;

    /// Driver name for logging
    fn name(&self) -> &str;
}

/// Tracks the session's fullscreen presentation state
///
/// Mirrors the driver-level active flag. Enter/exit failures are logged and
/// non-fatal: the session proceeds in windowed presentation and the submit
/// affordance stays reachable.
pub struct FullscreenGuard {
    driver: Option<Arc<dyn FullscreenDriver>>,
    active: bool,
}

impl FullscreenGuard {
    pub fn new(driver: Option<Arc<dyn FullscreenDriver>>) -> Self {
        Self {
            driver,
            active: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.driver.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter fullscreen for the session container. Returns whether the
    /// presentation mode is now active.
    pub async fn enter(&mut self, surface: SurfaceId) -> bool {
        let Some(driver) = self.driver.as_ref() else {
            debug!("fullscreen unsupported in this environment");
            return false;
        };

        match driver.enter(surface).await {
            Ok(()) => {
                debug!("entered fullscreen via {}", driver.name());
                self.active = true;
            }
            Err(e) => {
                warn!("fullscreen enter failed: {}", e);
            }
        }
        self.active
    }

    /// Leave fullscreen. A no-op when not active; a failed exit keeps the
    /// flag mirroring the still-active presentation.
    pub async fn exit(&mut self) {
        if !self.active {
            return;
        }

        let Some(driver) = self.driver.as_ref() else {
            self.active = false;
            return;
        };

        match driver.exit().await {
            Ok(()) => {
                debug!("exited fullscreen");
                self.active = false;
            }
            Err(e) => {
                warn!("fullscreen exit failed: {}", e);
            }
        }
    }
}
