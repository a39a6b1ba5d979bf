use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::SessionConfig;
use super::handle::SessionHandle;
use super::state::{RecordingPhase, SessionCommand, SessionError};
use super::summary::{AnswerRecord, SessionSnapshot, SessionSummary};
use crate::capture::{CaptureDevice, CaptureError, CaptureManager, MediaHandle};
use crate::fullscreen::{FullscreenDriver, FullscreenGuard};
use crate::questions::QuestionNavigator;
use crate::recorder::{Artifact, ArtifactInfo, Recorder};
use crate::speech::{SpeechEngine, SpeechEvent, Transcriber, TranscriptBuffer};
use crate::surface::PreviewSurface;

/// Mime type of finalized artifacts
const ARTIFACT_MIME: &str = "video/webm";

/// Depth of the session's ordered event queue
const EVENT_QUEUE_DEPTH: usize = 256;

/// Platform capabilities injected into a session
///
/// Each is optional; an absent capability degrades the matching affordance
/// instead of failing the session.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub capture: Option<Arc<dyn CaptureDevice>>,
    pub speech: Option<Arc<dyn SpeechEngine>>,
    pub fullscreen: Option<Arc<dyn FullscreenDriver>>,
}

/// Everything a successful command hands back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub snapshot: SessionSnapshot,
    /// Present after SubmitAnswer: the local acknowledgment payload
    pub answer: Option<AnswerRecord>,
    /// Present after SubmitTest
    pub summary: Option<SessionSummary>,
    /// Present after SubmitTest: where the navigation collaborator goes next
    pub redirect: Option<String>,
}

/// Inputs consumed by the session's event loop, in arrival order
pub(crate) enum Input {
    Command(
        SessionCommand,
        oneshot::Sender<Result<CommandOutcome, SessionError>>,
    ),
    Query(oneshot::Sender<SessionSnapshot>),
    MediaAcquired {
        generation: u64,
        result: Result<MediaHandle, CaptureError>,
    },
    Speech {
        generation: u64,
        event: SpeechEvent,
    },
}

/// The orchestrator: owns every resource slot and runs the per-question
/// recording cycle as a single event-loop task
///
/// All session state lives inside the loop; handles talk to it over one
/// ordered queue, so commands and subsystem completions are processed in
/// arrival order and the transition preconditions alone guard against
/// invalid composite states.
pub struct SessionController {
    id: Uuid,
    config: SessionConfig,
    capture: CaptureManager,
    transcriber: Transcriber,
    fullscreen: FullscreenGuard,
    navigator: QuestionNavigator,
    surface: PreviewSurface,

    phase: RecordingPhase,
    transcript: TranscriptBuffer,
    media: Option<MediaHandle>,
    recorder: Option<Recorder>,
    artifact: Option<Artifact>,
    answers: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,

    /// Bumped on every teardown; completions tagged with an older value are
    /// stale and get released/dropped on arrival
    attempt: u64,
    /// Generation of the in-flight capture acquisition, if any
    pending_acquire: Option<u64>,
    /// Degraded-capability feedback surfaced in snapshots
    notice: Option<String>,

    events: mpsc::WeakSender<Input>,
}

impl SessionController {
    /// Spawn the session event loop and return a handle to it.
    pub fn spawn(config: SessionConfig, capabilities: Capabilities) -> SessionHandle {
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let id = Uuid::new_v4();

        let controller = Self {
            id,
            capture: CaptureManager::new(capabilities.capture, config.constraints.clone()),
            transcriber: Transcriber::new(capabilities.speech),
            fullscreen: FullscreenGuard::new(capabilities.fullscreen),
            navigator: QuestionNavigator::new(config.questions.clone()),
            surface: PreviewSurface::new(),
            phase: RecordingPhase::Idle,
            transcript: TranscriptBuffer::new(),
            media: None,
            recorder: None,
            artifact: None,
            answers: Vec::new(),
            started_at: Utc::now(),
            attempt: 0,
            pending_acquire: None,
            notice: None,
            events: events_tx.downgrade(),
            config,
        };

        tokio::spawn(controller.run(events_rx));

        SessionHandle::new(id, events_tx)
    }

    async fn run(mut self, mut events: mpsc::Receiver<Input>) {
        info!(
            "session {} started: test {} with {} questions",
            self.id,
            self.config.test_id,
            self.navigator.len()
        );

        // Session mount: fullscreen entry and transcriber availability are
        // independent of each other; neither failure is fatal
        if !self.fullscreen.enter(self.surface.id()).await {
            self.notice = Some("fullscreen unavailable; continuing windowed".to_string());
        }
        if !self.transcriber.is_available() {
            info!("no speech engine present; transcripts will stay empty");
        }

        while let Some(input) = events.recv().await {
            match input {
                Input::Command(command, reply) => {
                    let result = self.handle_command(command).await;
                    let terminal = result.is_ok()
                        && matches!(
                            command,
                            SessionCommand::SubmitTest | SessionCommand::Abort
                        );
                    let _ = reply.send(result);
                    if terminal {
                        break;
                    }
                }
                Input::Query(reply) => {
                    let _ = reply.send(self.snapshot());
                }
                Input::MediaAcquired { generation, result } => {
                    self.on_media_acquired(generation, result).await;
                }
                Input::Speech { generation, event } => {
                    self.on_speech(generation, event);
                }
            }
        }

        // Mandatory cleanup, also reached when every handle is dropped
        // (abrupt navigation away): a leaked stream keeps the camera
        // indicator lit
        self.teardown_all().await;
        info!("session {} closed", self.id);
    }

    async fn handle_command(
        &mut self,
        command: SessionCommand,
    ) -> Result<CommandOutcome, SessionError> {
        debug!("session {} handling {}", self.id, command);
        match command {
            SessionCommand::StartRecording => self.start_recording().await,
            SessionCommand::StopRecording => self.stop_recording().await,
            SessionCommand::Retake => self.retake().await,
            SessionCommand::SubmitAnswer => self.submit_answer().await,
            SessionCommand::NextQuestion | SessionCommand::PreviousQuestion => {
                self.change_question(command).await
            }
            SessionCommand::SubmitTest => self.submit_test().await,
            SessionCommand::Abort => self.abort().await,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    async fn start_recording(&mut self) -> Result<CommandOutcome, SessionError> {
        if self.pending_acquire.is_some() {
            return Err(SessionError::AcquisitionPending {
                command: SessionCommand::StartRecording,
            });
        }
        if self.phase != RecordingPhase::Idle {
            return Err(SessionError::Rejected {
                phase: self.phase,
                command: SessionCommand::StartRecording,
            });
        }

        if !self.capture.is_available() {
            // Non-fatal: the affordance stays in its idle-equivalent state
            // with visible feedback instead of silently doing nothing
            warn!("session {}: no capture device, recording disabled", self.id);
            self.notice = Some("no capture device available; recording disabled".to_string());
            return Ok(self.outcome());
        }

        // A new cycle always releases the previous acquisition first
        self.capture.release(&mut self.media);

        self.attempt += 1;
        let generation = self.attempt;
        self.pending_acquire = Some(generation);

        let manager = self.capture.clone();
        let Some(tx) = self.events.upgrade() else {
            return Err(SessionError::Closed);
        };
        tokio::spawn(async move {
            let result = manager.acquire().await;
            // If the session closed meanwhile the unsent handle is dropped,
            // which releases the stream
            let _ = tx.send(Input::MediaAcquired { generation, result }).await;
        });

        debug!(
            "session {}: capture acquisition pending (attempt {})",
            self.id, generation
        );
        Ok(self.outcome())
    }

    async fn on_media_acquired(
        &mut self,
        generation: u64,
        result: Result<MediaHandle, CaptureError>,
    ) {
        if self.pending_acquire != Some(generation) {
            // A teardown ran while the acquisition was in flight: release
            // the just-acquired stream instead of binding it
            if let Ok(mut handle) = result {
                handle.release();
            }
            debug!("discarded stale capture acquisition (attempt {})", generation);
            return;
        }
        self.pending_acquire = None;

        let mut handle = match result {
            Ok(handle) => handle,
            Err(e) => {
                warn!("session {}: capture acquisition failed: {}", self.id, e);
                self.notice = Some(format!("recording unavailable: {}", e));
                return;
            }
        };

        // The recording cycle opens here: exactly one stream/recorder/
        // transcription triple, all scoped to this attempt generation
        let chunks = handle.take_chunks();
        self.surface.bind_live();
        self.transcript.clear();
        self.notice = None;

        let events = self.events.clone();
        self.transcriber.start(move |event| {
            if let Some(tx) = events.upgrade() {
                if let Err(e) = tx.try_send(Input::Speech { generation, event }) {
                    debug!("dropped speech event: {}", e);
                }
            }
        });

        if let Some(chunks) = chunks {
            self.recorder = Some(Recorder::start(chunks, ARTIFACT_MIME));
        }
        self.media = Some(handle);
        self.artifact = None;
        self.phase = RecordingPhase::Recording;

        info!(
            "session {}: recording question {} (attempt {})",
            self.id,
            self.navigator.current().id,
            generation
        );
    }

    fn on_speech(&mut self, generation: u64, event: SpeechEvent) {
        // Events from a torn-down attempt must not bleed into the current
        // question's transcript
        if generation != self.attempt {
            return;
        }
        self.transcript.apply(&event);
    }

    async fn stop_recording(&mut self) -> Result<CommandOutcome, SessionError> {
        if self.phase != RecordingPhase::Recording {
            return Err(SessionError::Rejected {
                phase: self.phase,
                command: SessionCommand::StopRecording,
            });
        }

        let artifact = match self.recorder.take() {
            Some(mut recorder) => recorder.stop().await.unwrap_or_else(|e| {
                warn!("session {}: recorder finalization failed: {}", self.id, e);
                None
            }),
            None => None,
        };
        self.transcriber.stop();

        self.artifact = artifact;
        // The stream stays acquired until retake/submit releases it, but the
        // preview now plays the finalized artifact with transport controls
        self.surface.bind_playback();
        self.phase = RecordingPhase::Recorded;

        info!(
            "session {}: recording stopped for question {}",
            self.id,
            self.navigator.current().id
        );
        Ok(self.outcome())
    }

    async fn retake(&mut self) -> Result<CommandOutcome, SessionError> {
        if self.phase != RecordingPhase::Recorded {
            return Err(SessionError::Rejected {
                phase: self.phase,
                command: SessionCommand::Retake,
            });
        }

        self.teardown_recording_resources().await;
        self.artifact = None;
        self.transcript.clear();
        self.phase = RecordingPhase::Idle;

        info!(
            "session {}: retake on question {}",
            self.id,
            self.navigator.current().id
        );
        Ok(self.outcome())
    }

    async fn submit_answer(&mut self) -> Result<CommandOutcome, SessionError> {
        if self.phase != RecordingPhase::Recorded {
            return Err(SessionError::Rejected {
                phase: self.phase,
                command: SessionCommand::SubmitAnswer,
            });
        }

        let question = self.navigator.current().clone();
        let record = AnswerRecord {
            question_id: question.id,
            question_text: question.text,
            transcript: self.transcript.committed().to_string(),
            recorded_at: Utc::now(),
            artifact: self.artifact.as_ref().map(ArtifactInfo::from),
        };
        info!(
            "session {}: answer submitted for question {} ({} transcript chars)",
            self.id,
            record.question_id,
            record.transcript.len()
        );
        self.answers.push(record.clone());

        self.teardown_recording_resources().await;
        self.artifact = None;
        self.transcript.clear();
        self.phase = RecordingPhase::Idle;

        let mut outcome = self.outcome();
        outcome.answer = Some(record);
        Ok(outcome)
    }

    async fn change_question(
        &mut self,
        command: SessionCommand,
    ) -> Result<CommandOutcome, SessionError> {
        if self.phase == RecordingPhase::Recording {
            return Err(SessionError::Rejected {
                phase: self.phase,
                command,
            });
        }

        let will_move = match command {
            SessionCommand::NextQuestion => !self.navigator.is_last(),
            SessionCommand::PreviousQuestion => !self.navigator.is_first(),
            _ => unreachable!("change_question only handles navigation commands"),
        };
        if !will_move {
            // Clamped: nothing to tear down, nothing mutates
            return Ok(self.outcome());
        }

        // The outgoing question's resources and transcript go away before
        // the incoming question becomes observable
        self.teardown_recording_resources().await;
        self.artifact = None;
        self.transcript.clear();
        self.phase = RecordingPhase::Idle;

        match command {
            SessionCommand::NextQuestion => self.navigator.next(),
            SessionCommand::PreviousQuestion => self.navigator.previous(),
            _ => unreachable!(),
        };

        info!(
            "session {}: moved to question {} ({}/{})",
            self.id,
            self.navigator.current().id,
            self.navigator.index() + 1,
            self.navigator.len()
        );
        Ok(self.outcome())
    }

    async fn submit_test(&mut self) -> Result<CommandOutcome, SessionError> {
        // Recording must not be orphaned and a recorded answer must not be
        // silently discarded: submit or retake it first
        if self.phase != RecordingPhase::Idle {
            return Err(SessionError::Rejected {
                phase: self.phase,
                command: SessionCommand::SubmitTest,
            });
        }

        self.teardown_recording_resources().await;
        self.fullscreen.exit().await;

        let summary = SessionSummary {
            session_id: self.id,
            test_id: self.config.test_id.clone(),
            started_at: self.started_at,
            finished_at: Utc::now(),
            questions_total: self.navigator.len(),
            answers: self.answers.clone(),
        };
        info!(
            "session {}: test submitted, {}/{} questions answered",
            self.id,
            summary.answers.len(),
            summary.questions_total
        );

        let mut outcome = self.outcome();
        outcome.summary = Some(summary);
        outcome.redirect = Some(self.config.listing_route.clone());
        Ok(outcome)
    }

    async fn abort(&mut self) -> Result<CommandOutcome, SessionError> {
        info!("session {}: aborted", self.id);
        self.teardown_all().await;
        Ok(self.outcome())
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Release the media/recorder/transcription triple of the current
    /// attempt. Idempotent; every step tolerates an already-inactive
    /// resource.
    async fn teardown_recording_resources(&mut self) {
        // Invalidate in-flight acquisitions and speech events first
        self.attempt += 1;
        self.pending_acquire = None;

        self.transcriber.stop();
        if let Some(mut recorder) = self.recorder.take() {
            recorder.discard().await;
        }
        self.capture.release(&mut self.media);
        self.surface.clear();
    }

    async fn teardown_all(&mut self) {
        self.teardown_recording_resources().await;
        self.artifact = None;
        self.transcript.clear();
        self.phase = RecordingPhase::Idle;
        self.fullscreen.exit().await;
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    fn outcome(&self) -> CommandOutcome {
        CommandOutcome {
            snapshot: self.snapshot(),
            answer: None,
            summary: None,
            redirect: None,
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            test_id: self.config.test_id.clone(),
            phase: self.phase,
            question_index: self.navigator.index(),
            question_total: self.navigator.len(),
            question: self.navigator.current().clone(),
            transcript: self.transcript.committed().to_string(),
            interim: self.transcript.interim().to_string(),
            has_artifact: self.artifact.is_some(),
            preview: self.surface.mode(),
            preview_controls: self.surface.controls_enabled(),
            fullscreen_active: self.fullscreen.is_active(),
            capture_available: self.capture.is_available(),
            speech_available: self.transcriber.is_available(),
            can_go_next: self.phase != RecordingPhase::Recording && !self.navigator.is_last(),
            can_submit_test: self.phase == RecordingPhase::Idle,
            answered: self.answers.len(),
            notice: self.notice.clone(),
        }
    }
}
