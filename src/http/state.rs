use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::capture::CaptureConstraints;
use crate::session::{Capabilities, SessionHandle};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active screening sessions (session id → handle)
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,

    /// Capabilities injected into every new session
    pub capabilities: Capabilities,

    /// Capture constraints applied to every new session
    pub constraints: CaptureConstraints,

    /// Redirect target handed back on test submission
    pub listing_route: String,
}

impl AppState {
    pub fn new(
        capabilities: Capabilities,
        constraints: CaptureConstraints,
        listing_route: String,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capabilities,
            constraints,
            listing_route,
        }
    }
}
