//! Session command parsing.
//!
//! Stdin lines stand in for the tap areas and buttons of a physical
//! clock. Invalid player identifiers are rejected here, at the boundary,
//! so they never reach the clock engine.

use std::str::FromStr;

use thiserror::Error;

use crate::types::Player;

// ============================================================================
// CommandError
// ============================================================================

/// Errors produced while parsing a session command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The input was not a recognized command.
    #[error("unknown command '{0}' (try 1, 2, r, l or q)")]
    Unknown(String),

    /// A player identifier that is not 1 or 2.
    #[error("unknown player '{0}' (players are 1 and 2)")]
    InvalidPlayer(String),
}

// ============================================================================
// Command
// ============================================================================

/// A single session command entered on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Tap the given player's clock
    Tap(Player),
    /// Restart the game with the original time control
    Restart,
    /// Toggle the control lock
    Lock,
    /// Leave the game
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();

        match token.as_str() {
            "1" | "p1" => Ok(Command::Tap(Player::One)),
            "2" | "p2" => Ok(Command::Tap(Player::Two)),
            "r" | "restart" => Ok(Command::Restart),
            "l" | "lock" => Ok(Command::Lock),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => {
                // Numeric-looking input is a bad player id, not a typo'd verb.
                let digits = token.strip_prefix('p').unwrap_or(&token);
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    Err(CommandError::InvalidPlayer(s.trim().to_string()))
                } else {
                    Err(CommandError::Unknown(s.trim().to_string()))
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
