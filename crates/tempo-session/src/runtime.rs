//! Async executor for session commands.
//!
//! The session itself is synchronous; the runtime runs its side effects on
//! spawned tasks and feeds outcomes back through one event channel, which is
//! what gives the whole client its single-logical-thread shape.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use tempo_engine::EngineClient;

use crate::session::{ReadinessReport, Session, SessionCommand, SessionEvent};

/// Capacity of the session event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns a [`Session`] and executes the commands it emits.
pub struct SessionRuntime {
    session: Session,
    client: Arc<EngineClient>,
    events_tx: mpsc::Sender<SessionEvent>,
    move_request_delay: Duration,
}

impl SessionRuntime {
    /// Create the runtime plus the receiving half of its event channel.
    ///
    /// The caller drives the loop: everything received on the channel goes
    /// back into [`Self::dispatch`].
    #[must_use]
    pub fn new(
        client: EngineClient,
        move_request_delay: Duration,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            Self {
                session: Session::new(),
                client: Arc::new(client),
                events_tx,
                move_request_delay,
            },
            events_rx,
        )
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// A sender for external producers (push channel, display surface).
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<SessionEvent> {
        self.events_tx.clone()
    }

    /// Run a readiness probe on a spawned task.
    ///
    /// The outcome comes back through the event channel as
    /// [`SessionEvent::ReadinessResolved`], so the caller's loop never waits
    /// on the probe.
    pub fn spawn_readiness_probe(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let report = ReadinessReport::from_probe(client.status().await);
            let _ = tx.send(SessionEvent::ReadinessResolved(report)).await;
        });
    }

    /// Feed one event through the session and execute resulting commands.
    pub fn dispatch(&mut self, event: SessionEvent) {
        for command in self.session.handle(event) {
            self.execute(command);
        }
    }

    fn execute(&self, command: SessionCommand) {
        match command {
            SessionCommand::RequestEngineMove { generation, fen } => {
                let client = Arc::clone(&self.client);
                let tx = self.events_tx.clone();
                let delay = self.move_request_delay;
                tokio::spawn(async move {
                    // Debounce: let the display render the player's move
                    // before the board goes non-interactive.
                    tokio::time::sleep(delay).await;
                    let outcome = client.request_move(&fen).await;
                    let _ = tx
                        .send(SessionEvent::EngineMove {
                            generation,
                            outcome,
                        })
                        .await;
                });
            }
            SessionCommand::NotifyReset { fen } => {
                let client = Arc::clone(&self.client);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = client.notify_reset(&fen).await {
                        let _ = tx
                            .send(SessionEvent::ResetNotifyFailed(err.to_string()))
                            .await;
                    }
                });
            }
        }
    }
}
