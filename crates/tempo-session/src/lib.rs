//! # tempo-session
//!
//! The core of the tempo client:
//! - [`rules::GameState`]: state-replacement rules adapter over shakmaty
//! - [`Session`]: the turn-synchronization state machine, pure and
//!   synchronously testable
//! - [`SessionRuntime`]: the tokio executor for the session's side effects
//!
//! The session coordinates locally-validated player moves with asynchronous,
//! fallible engine calls while the push channel feeds the same log stream; no
//! failure is fatal, every error path hands the turn back to the player.

pub mod rules;
pub mod runtime;
pub mod session;

pub use rules::{GameState, RulesError};
pub use runtime::SessionRuntime;
pub use session::{ReadinessReport, Session, SessionCommand, SessionEvent, Square};
