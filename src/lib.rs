//! Chess Clock Library
//!
//! This library provides the core functionality for the chess clock CLI.
//! It includes:
//! - Clock engine with the turn-based countdown state machine
//! - Interactive terminal session wiring stdin to the engine
//! - CLI command parsing and display utilities
//! - Type definitions for configuration and observable state

pub mod app;
pub mod cli;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{run_ticker, ClockEngine, ClockEvent, TICK_INTERVAL};
pub use types::{ClockPhase, ClockState, GameConfig, Player, MS_PER_MINUTE};

// Re-export session types
pub use app::input::{Command, CommandError};
pub use app::GameSession;
