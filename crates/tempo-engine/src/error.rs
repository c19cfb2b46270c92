//! Engine transport error types.
//!
//! None of these are fatal to a session: every failure degrades to "the turn
//! returns to the player" upstream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Network-level failure, timeout, or a non-2xx response.
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered a move request without a usable move.
    #[error("no move received")]
    NoMove,

    /// The push channel gave up after exhausting its reconnect budget.
    #[error("push channel gave up after {attempts} reconnect attempts")]
    ReconnectExhausted { attempts: u32 },
}
