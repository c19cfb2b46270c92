//! The turn-synchronization state machine.
//!
//! `Session` owns the position, the turn, the phase, and the log stream. It
//! is pure with respect to I/O: inputs arrive as [`SessionEvent`]s and the
//! side effects it wants come back as [`SessionCommand`]s for the runtime to
//! execute. That keeps every transition, including stale-response
//! suppression, synchronously testable.
//!
//! At most one engine-move request is in flight at a time: a request command
//! is only emitted on entry to the requesting phase, and a reset supersedes a
//! pending request by bumping the generation counter so the eventual response
//! is dropped on arrival.

use tempo_core::{EngineReadiness, LogAggregator, LogKind, Phase, Turn};
use tempo_engine::{EngineError, PushEvent};

use crate::rules::GameState;

pub use shakmaty::Square;

/// Readiness probe outcome, transport failure already folded in.
#[derive(Debug)]
pub struct ReadinessReport {
    pub readiness: EngineReadiness,
    pub failure: Option<String>,
}

impl ReadinessReport {
    /// Map a probe result: a transport failure resolves to the `Error`
    /// readiness plus the underlying message for the log.
    #[must_use]
    pub fn from_probe(result: Result<EngineReadiness, EngineError>) -> Self {
        match result {
            Ok(readiness) => Self {
                readiness,
                failure: None,
            },
            Err(err) => Self {
                readiness: EngineReadiness::Error,
                failure: Some(err.to_string()),
            },
        }
    }
}

/// Everything that can happen to a session.
#[derive(Debug)]
pub enum SessionEvent {
    /// The startup (or a later) readiness probe resolved.
    ReadinessResolved(ReadinessReport),
    /// The player dropped a piece from one square onto another.
    MoveIntent { from: Square, to: Square },
    /// An engine-move request finished. `generation` is the tag the request
    /// was issued under; stale generations are dropped silently.
    EngineMove {
        generation: u64,
        outcome: Result<String, EngineError>,
    },
    /// The best-effort reset notification failed.
    ResetNotifyFailed(String),
    /// An event arrived on the push channel.
    Push(PushEvent),
    /// The player asked for a fresh board.
    Reset,
    /// The player asked to clear the log view.
    ClearLog,
}

/// Side effects the runtime must perform on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Issue an engine-move request (after the configured debounce delay)
    /// and feed the outcome back as [`SessionEvent::EngineMove`] with this
    /// generation.
    RequestEngineMove { generation: u64, fen: String },
    /// Fire-and-forget: tell the engine about the post-reset position.
    NotifyReset { fen: String },
}

/// One game session: position, turn, phase, and log, owned together.
#[derive(Debug)]
pub struct Session {
    game: GameState,
    turn: Turn,
    phase: Phase,
    readiness: EngineReadiness,
    generation: u64,
    log: LogAggregator,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            game: GameState::starting(),
            turn: Turn::Player,
            phase: Phase::AwaitingReadiness,
            readiness: EngineReadiness::Unknown,
            generation: 0,
            log: LogAggregator::new(),
        }
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.game.fen()
    }

    #[must_use]
    pub const fn turn(&self) -> Turn {
        self.turn
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn readiness(&self) -> EngineReadiness {
        self.readiness
    }

    #[must_use]
    pub const fn log(&self) -> &LogAggregator {
        &self.log
    }

    /// Phase changes other than reset go through the transition table.
    fn set_phase(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "phase transition {} -> {} not allowed",
            self.phase,
            next
        );
        self.phase = next;
    }

    /// Feed one event through the state machine.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionCommand> {
        match event {
            SessionEvent::ReadinessResolved(report) => self.on_readiness(report),
            SessionEvent::MoveIntent { from, to } => self.on_move_intent(from, to),
            SessionEvent::EngineMove {
                generation,
                outcome,
            } => self.on_engine_move(generation, outcome),
            SessionEvent::ResetNotifyFailed(message) => {
                self.log
                    .record_local(LogKind::Error, format!("Reset sync failed: {message}"));
                Vec::new()
            }
            SessionEvent::Push(event) => self.on_push(event),
            SessionEvent::Reset => self.on_reset(),
            SessionEvent::ClearLog => {
                self.log.clear();
                Vec::new()
            }
        }
    }

    fn on_readiness(&mut self, report: ReadinessReport) -> Vec<SessionCommand> {
        self.readiness = report.readiness;
        if let Some(failure) = report.failure {
            self.log
                .record_local(LogKind::Error, format!("Engine status check failed: {failure}"));
        }
        self.log
            .record_local(LogKind::Info, format!("Engine status: {}", self.readiness));
        if self.readiness.is_ready() && self.phase == Phase::AwaitingReadiness {
            self.set_phase(Phase::PlayerToMove);
        }
        Vec::new()
    }

    fn on_move_intent(&mut self, from: Square, to: Square) -> Vec<SessionCommand> {
        if !self.phase.accepts_player_moves() || !self.readiness.is_ready() {
            tracing::debug!(phase = %self.phase, readiness = %self.readiness, "move intent ignored");
            return Vec::new();
        }
        // Illegal drags are UI-local: no state change, no log entry.
        let Ok((next, san)) = self.game.apply_intent(from, to) else {
            tracing::debug!(%from, %to, "illegal move intent rejected");
            return Vec::new();
        };
        self.game = next;
        self.turn = self.turn.flip();
        self.log
            .record_local(LogKind::Info, format!("Player move: {san}"));
        self.enter_requesting()
    }

    fn enter_requesting(&mut self) -> Vec<SessionCommand> {
        self.set_phase(Phase::RequestingEngineMove);
        self.log
            .record_local(LogKind::Info, "Requesting engine move");
        vec![SessionCommand::RequestEngineMove {
            generation: self.generation,
            fen: self.game.fen(),
        }]
    }

    fn on_engine_move(
        &mut self,
        generation: u64,
        outcome: Result<String, EngineError>,
    ) -> Vec<SessionCommand> {
        if generation != self.generation || self.phase != Phase::RequestingEngineMove {
            tracing::debug!(generation, current = self.generation, "stale engine response dropped");
            return Vec::new();
        }
        match outcome {
            Ok(text) => {
                self.log
                    .record_local(LogKind::Info, format!("Engine move: {text}"));
                self.set_phase(Phase::ApplyingEngineResult);
                match self.game.apply_engine_move(&text) {
                    Ok((next, san)) => {
                        self.game = next;
                        self.turn = self.turn.flip();
                        self.set_phase(Phase::PlayerToMove);
                        self.log
                            .record_local(LogKind::Info, format!("Applied engine move: {san}"));
                    }
                    Err(_) => {
                        // Discard the illegal move; the position stays put.
                        self.log
                            .record_local(LogKind::Error, format!("Invalid engine move: {text}"));
                        self.recover_to_player();
                    }
                }
            }
            Err(err) => {
                self.log
                    .record_local(LogKind::Error, format!("Engine move failed: {err}"));
                self.recover_to_player();
            }
        }
        Vec::new()
    }

    /// Error recovery: the turn returns to the player without consuming an
    /// alternation, and the failed request is not retried.
    fn recover_to_player(&mut self) {
        self.set_phase(Phase::RecoveringFromEngineError);
        self.turn = Turn::Player;
        self.set_phase(Phase::PlayerToMove);
    }

    fn on_push(&mut self, event: PushEvent) -> Vec<SessionCommand> {
        match event {
            PushEvent::WelcomeMessage { ascii, description } => {
                self.log.record_welcome(&ascii, &description);
            }
            PushEvent::RawEngineLog { message } => {
                self.log.record_pushed(&message);
            }
        }
        Vec::new()
    }

    fn on_reset(&mut self) -> Vec<SessionCommand> {
        // Supersede any in-flight request: its response arrives under an old
        // generation and is dropped.
        self.generation += 1;
        self.game = GameState::starting();
        self.turn = Turn::Player;
        self.phase = Phase::PlayerToMove;
        self.log
            .record_local(LogKind::Info, "Board reset to starting position");
        vec![SessionCommand::NotifyReset {
            fen: self.game.fen(),
        }]
    }
}
