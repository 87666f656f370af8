use super::controller::PracticeSession;
use super::error::SessionError;
use super::snapshot::SessionSnapshot;
use crate::timer::Tick;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

const COMMAND_BUFFER: usize = 32;

/// Learner actions forwarded to a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Skip,
    Stop,
    Redo,
    Next,
    Previous,
    Reset,
    SetOneLine {
        enabled: bool,
        highlight: Option<String>,
    },
}

enum Command {
    Apply {
        action: SessionAction,
        reply: oneshot::Sender<Result<SessionSnapshot, SessionError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Close {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Cloneable handle to a session running on its own task
#[derive(Clone)]
pub struct SessionHandle {
    session_id: String,
    tx: mpsc::Sender<Command>,
}

/// Run `session` on a new task
///
/// User actions and clock ticks are handled one at a time, in arrival order.
pub fn spawn(
    mut session: PracticeSession,
    mut ticks: mpsc::UnboundedReceiver<Tick>,
) -> SessionHandle {
    let (tx, mut rx) = mpsc::channel(COMMAND_BUFFER);
    let session_id = session.id().to_string();

    tokio::spawn(async move {
        info!("Session task started: {}", session.id());

        loop {
            tokio::select! {
                command = rx.recv() => match command {
                    Some(Command::Apply { action, reply }) => {
                        let outcome = apply(&mut session, action)
                            .await
                            .map(|_| session.snapshot());
                        let _ = reply.send(outcome);
                    }
                    Some(Command::Snapshot { reply }) => {
                        let _ = reply.send(session.snapshot());
                    }
                    Some(Command::Close { reply }) => {
                        session.close().await;
                        let _ = reply.send(session.snapshot());
                        break;
                    }
                    None => {
                        session.close().await;
                        break;
                    }
                },
                Some(tick) = ticks.recv() => {
                    if let Err(e) = session.on_tick(tick).await {
                        warn!("Session {}: tick failed: {}", session.id(), e);
                    }
                }
            }
        }

        info!("Session task stopped: {}", session.id());
    });

    SessionHandle { session_id, tx }
}

async fn apply(session: &mut PracticeSession, action: SessionAction) -> Result<(), SessionError> {
    match action {
        SessionAction::Skip => session.skip().await,
        SessionAction::Stop => session.stop().await,
        SessionAction::Redo => session.redo().await,
        SessionAction::Next => session.next().await,
        SessionAction::Previous => session.previous().await,
        SessionAction::Reset => {
            session.reset().await;
            Ok(())
        }
        SessionAction::SetOneLine { enabled, highlight } => {
            session.set_one_line(enabled, highlight).await
        }
    }
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.session_id
    }

    /// Apply an action and return the resulting snapshot
    pub async fn apply(&self, action: SessionAction) -> Result<SessionSnapshot, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Command::Apply { action, reply })
            .await
            .map_err(|_| self.closed())?;
        response.await.map_err(|_| self.closed())?
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| self.closed())?;
        response.await.map_err(|_| self.closed())
    }

    /// Stop capture and the session task; returns the final snapshot
    pub async fn close(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Command::Close { reply })
            .await
            .map_err(|_| self.closed())?;
        response.await.map_err(|_| self.closed())
    }

    fn closed(&self) -> SessionError {
        SessionError::Closed(self.session_id.clone())
    }
}
