//! Core data types for the chess clock.
//!
//! This module defines the data structures used for:
//! - Player identification
//! - Game configuration with validation
//! - The observable clock state snapshot

use serde::{Deserialize, Serialize};

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: u64 = 60_000;

// ============================================================================
// Player
// ============================================================================

/// Identifies one of the two players at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    /// Player one (bottom clock)
    One,
    /// Player two (top clock)
    Two,
}

impl Player {
    /// Returns the opponent of this player.
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns a short display label ("P1" / "P2").
    pub fn label(&self) -> &'static str {
        match self {
            Player::One => "P1",
            Player::Two => "P2",
        }
    }
}

// ============================================================================
// ClockPhase
// ============================================================================

/// The coarse state of a game, derived from the clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// Game created, no countdown running yet
    Idle,
    /// The named player's clock is counting down
    Running(Player),
    /// A clock reached zero; the game is over
    Finished,
}

// ============================================================================
// GameConfig
// ============================================================================

/// Configuration for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Time per player in minutes (1-600)
    pub minutes: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { minutes: 5 }
    }
}

impl GameConfig {
    /// Creates a configuration with the given per-player minutes.
    pub fn new(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.minutes < 1 || self.minutes > 600 {
            return Err("time control must be between 1 and 600 minutes".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// ClockState
// ============================================================================

/// The observable state of a game, published to the presentation layer.
///
/// All mutation goes through [`crate::engine::ClockEngine`]; consumers only
/// ever read a snapshot of this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    /// Player one's remaining time in milliseconds
    pub player1_remaining_ms: u64,
    /// Player two's remaining time in milliseconds
    pub player2_remaining_ms: u64,
    /// The player whose clock is currently running, if any
    pub active_player: Option<Player>,
    /// True once a clock has reached zero
    pub finished: bool,
    /// Advisory lock for exit/restart controls
    pub controls_locked: bool,
    /// Per-player starting time for this game, in milliseconds
    pub initial_duration_ms: u64,
}

impl ClockState {
    /// Creates the state for a fresh game with the given per-player minutes.
    pub fn new(minutes: u32) -> Self {
        let duration_ms = u64::from(minutes) * MS_PER_MINUTE;
        Self {
            player1_remaining_ms: duration_ms,
            player2_remaining_ms: duration_ms,
            active_player: None,
            finished: false,
            controls_locked: false,
            initial_duration_ms: duration_ms,
        }
    }

    /// Returns the remaining time of the given player.
    pub fn remaining_ms(&self, player: Player) -> u64 {
        match player {
            Player::One => self.player1_remaining_ms,
            Player::Two => self.player2_remaining_ms,
        }
    }

    /// Sets the remaining time of the given player.
    pub(crate) fn set_remaining_ms(&mut self, player: Player, remaining_ms: u64) {
        match player {
            Player::One => self.player1_remaining_ms = remaining_ms,
            Player::Two => self.player2_remaining_ms = remaining_ms,
        }
    }

    /// Returns the derived game phase.
    pub fn phase(&self) -> ClockPhase {
        if self.finished {
            ClockPhase::Finished
        } else {
            match self.active_player {
                Some(player) => ClockPhase::Running(player),
                None => ClockPhase::Idle,
            }
        }
    }

    /// Returns true if a countdown is currently running.
    pub fn is_running(&self) -> bool {
        !self.finished && self.active_player.is_some()
    }

    /// Returns true if the game is created but no clock has started.
    pub fn is_idle(&self) -> bool {
        !self.finished && self.active_player.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================
