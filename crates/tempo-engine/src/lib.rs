//! # tempo-engine
//!
//! Transport layer for the remote chess engine:
//! - [`EngineClient`]: the HTTP request channel (readiness probe, move
//!   requests, best-effort reset notification)
//! - [`PushEvent`] / [`PushConnector`] / [`run_push_channel`]: the
//!   server-initiated push channel with bounded reconnection
//!
//! Turn-protocol semantics live in `tempo-session`; this crate only moves
//! bytes and maps them to typed values.

mod client;
mod error;
mod push;

pub use client::EngineClient;
pub use error::EngineError;
pub use push::{HttpPushConnector, PushConnector, PushEvent, ReconnectPolicy, run_push_channel};
