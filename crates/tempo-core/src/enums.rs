//! Turn ownership, engine readiness, and session phase enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `Phase` carries the turn-controller state machine and provides
//! `allowed_next_states()` to enforce valid transitions at the application layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// Which side holds the move. Exactly one holder at any instant; flips only on
/// a successfully applied move or an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Player,
    Engine,
}

impl Turn {
    /// The other side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Player => Self::Engine,
            Self::Engine => Self::Player,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Engine => "engine",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EngineReadiness
// ---------------------------------------------------------------------------

/// Remote engine readiness as resolved by the startup probe.
///
/// Gates whether player moves are accepted; anything but `Ready` keeps the
/// session in its readiness-wait phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineReadiness {
    Unknown,
    Loading,
    Ready,
    Unavailable,
    Error,
}

impl EngineReadiness {
    /// Map the remote status field to a readiness value.
    ///
    /// Unrecognized status strings map to `Unavailable`; a transport failure
    /// (no status string at all) is `Error` and is mapped by the caller.
    #[must_use]
    pub fn from_remote_status(status: &str) -> Self {
        match status.trim() {
            "ready" => Self::Ready,
            "loading" => Self::Loading,
            _ => Self::Unavailable,
        }
    }

    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Unavailable => "unavailable",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for EngineReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Turn-controller phase.
///
/// ```text
/// awaiting_readiness → player_to_move → requesting_engine_move → applying_engine_result → player_to_move
///                                                              → recovering_from_engine_error → player_to_move
/// ```
///
/// A reset is valid from any phase and lands on `PlayerToMove`; it is not
/// encoded as self-loops in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingReadiness,
    PlayerToMove,
    RequestingEngineMove,
    ApplyingEngineResult,
    RecoveringFromEngineError,
}

impl Phase {
    /// Valid next phases from the current phase, reset excluded.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::AwaitingReadiness => &[Self::PlayerToMove],
            Self::PlayerToMove => &[Self::RequestingEngineMove],
            Self::RequestingEngineMove => &[
                Self::ApplyingEngineResult,
                Self::RecoveringFromEngineError,
            ],
            Self::ApplyingEngineResult => &[Self::PlayerToMove, Self::RecoveringFromEngineError],
            Self::RecoveringFromEngineError => &[Self::PlayerToMove],
        }
    }

    /// Check whether transitioning to `next` is allowed (reset excluded).
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the session accepts move intents in this phase.
    #[must_use]
    pub const fn accepts_player_moves(self) -> bool {
        matches!(self, Self::PlayerToMove)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingReadiness => "awaiting_readiness",
            Self::PlayerToMove => "player_to_move",
            Self::RequestingEngineMove => "requesting_engine_move",
            Self::ApplyingEngineResult => "applying_engine_result",
            Self::RecoveringFromEngineError => "recovering_from_engine_error",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
