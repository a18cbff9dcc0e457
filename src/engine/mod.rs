//! Clock engine module.
//!
//! This module contains the core game logic:
//! - `clock`: Turn-based countdown engine with state transitions and events

pub mod clock;

pub use clock::{run_ticker, ClockEngine, ClockEvent, TICK_INTERVAL};
