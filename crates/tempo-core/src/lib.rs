//! # tempo-core
//!
//! Core types for the tempo chess client.
//!
//! This crate provides the foundational types shared across all tempo crates:
//! - Turn ownership, engine readiness, and session phase enums
//! - The typed, append-only session log stream and its aggregator
//! - The standard starting position constant
//!
//! It performs no I/O; everything here is owned session state.

pub mod enums;
pub mod log;

pub use enums::{EngineReadiness, Phase, Turn};
pub use log::{LogAggregator, LogEntry, LogKind};

/// FEN of the standard chess starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
