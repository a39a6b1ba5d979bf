use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::controller::{CommandOutcome, Input};
use super::state::{SessionCommand, SessionError};
use super::summary::SessionSnapshot;

/// Cloneable handle to a running session
///
/// Commands are queued to the session's event loop and answered through a
/// oneshot reply. Once the loop has terminated (SubmitTest, Abort, or every
/// handle dropped) all calls answer `SessionError::Closed`.
#[derive(Clone)]
pub struct SessionHandle {
    id: Uuid,
    events: mpsc::Sender<Input>,
}

impl SessionHandle {
    pub(crate) fn new(id: Uuid, events: mpsc::Sender<Input>) -> Self {
        Self { id, events }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Run one candidate-facing command against the session.
    pub async fn command(
        &self,
        command: SessionCommand,
    ) -> Result<CommandOutcome, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events
            .send(Input::Command(command, reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Read-only point-in-time view of the session.
    pub async fn status(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events
            .send(Input::Query(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }
}
