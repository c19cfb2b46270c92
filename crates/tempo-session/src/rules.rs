//! Chess rule application backed by shakmaty.
//!
//! `GameState` is an immutable position handle: every accepted move or reset
//! produces a new value, never an in-place mutation, so "turn and position
//! change together" stays enforceable for the session that owns it.

use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role, Square, fen::Fen,
    san::SanPlus, uci::UciMove,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// The drag intent does not correspond to a legal move. Not surfaced to
    /// the session log; intents are a UI-local affair.
    #[error("no legal move from {from} to {to}")]
    IllegalIntent { from: Square, to: Square },

    /// The engine's move text does not parse or apply against this position.
    #[error("unparsable move: {0}")]
    Unparsable(String),
}

/// The current position. Replaced, never mutated.
#[derive(Debug, Clone)]
pub struct GameState {
    pos: Chess,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pos: Chess::default(),
        }
    }
}

impl GameState {
    /// The standard starting position.
    #[must_use]
    pub fn starting() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|err| RulesError::InvalidFen(format!("{err}")))?;
        let pos = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|err| RulesError::InvalidFen(format!("{err}")))?;
        Ok(Self { pos })
    }

    /// Canonical FEN serialization of this position.
    #[must_use]
    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.pos.turn()
    }

    /// Apply a drag-style move intent.
    ///
    /// Under-specified promotions default to a queen. Returns the successor
    /// state and the SAN of the move played.
    pub fn apply_intent(&self, from: Square, to: Square) -> Result<(Self, String), RulesError> {
        let chosen = self
            .pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.from() == Some(from) && m.to() == to)
            .find(|m| matches!(m.promotion(), None | Some(Role::Queen)))
            .ok_or(RulesError::IllegalIntent { from, to })?;
        self.play(&chosen)
            .ok_or(RulesError::IllegalIntent { from, to })
    }

    /// Apply an engine move with best-effort parsing: coordinate (UCI) first,
    /// then SAN with check/mate suffixes tolerated.
    ///
    /// A move that does not apply to this position leaves it untouched.
    pub fn apply_engine_move(&self, text: &str) -> Result<(Self, String), RulesError> {
        let text = text.trim();
        let mv = self
            .parse_permissive(text)
            .ok_or_else(|| RulesError::Unparsable(text.to_string()))?;
        self.play(&mv)
            .ok_or_else(|| RulesError::Unparsable(text.to_string()))
    }

    fn parse_permissive(&self, text: &str) -> Option<Move> {
        if let Ok(uci) = text.parse::<UciMove>() {
            if let Ok(mv) = uci.to_move(&self.pos) {
                return Some(mv);
            }
        }
        if let Ok(san) = text.parse::<SanPlus>() {
            if let Ok(mv) = san.san.to_move(&self.pos) {
                return Some(mv);
            }
        }
        None
    }

    fn play(&self, mv: &Move) -> Option<(Self, String)> {
        let san = SanPlus::from_move(self.pos.clone(), mv).to_string();
        let pos = self.pos.clone().play(mv).ok()?;
        Some((Self { pos }, san))
    }
}
