//! Display utilities for the chess clock CLI.
//!
//! This module provides formatted output for:
//! - The in-place two-clock line
//! - Game start / turn / flag / lock messages
//! - Error messages
//! - JSON state snapshots for machine consumers

use std::io::Write;

use crate::types::{ClockState, Player};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the game start banner with the chosen time control.
    pub fn show_game_started(minutes: u32) {
        println!(
            "* New game: {} min per player (both clocks at {})",
            minutes,
            Self::format_clock(u64::from(minutes) * 60_000)
        );
        println!("  1/2 = tap a clock, r = restart, l = lock, q = quit");
    }

    /// Shows which player's countdown has started.
    pub fn show_countdown_started(player: Player) {
        println!("> {} is on the move", player.label());
    }

    /// Redraws the two-clock line in place.
    pub fn show_clocks(p1_ms: u64, p2_ms: u64, active: Option<Player>) {
        let marker = |player: Player| -> &'static str {
            if active == Some(player) {
                ">"
            } else {
                " "
            }
        };

        print!(
            "\r{}P1 {}  |  {}P2 {}   ",
            marker(Player::One),
            Self::format_clock(p1_ms),
            marker(Player::Two),
            Self::format_clock(p2_ms)
        );
        let _ = std::io::stdout().flush();
    }

    /// Shows the end-of-game message when a player runs out of time.
    pub fn show_flagged(player: Player) {
        println!();
        println!(
            "[] {} flagged - {} wins on time",
            player.label(),
            player.opponent().label()
        );
    }

    /// Shows the control lock state.
    pub fn show_lock(locked: bool) {
        if locked {
            println!("* Controls locked (taps still work, l to unlock)");
        } else {
            println!("* Controls unlocked");
        }
    }

    /// Shows a refusal when a locked control is used.
    pub fn show_locked_refusal() {
        println!("* Controls are locked - press l to unlock first");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Prints one state snapshot as a JSON line.
    pub fn show_json(state: &ClockState) {
        match serde_json::to_string(state) {
            Ok(json) => println!("{}", json),
            Err(e) => Self::show_error(&format!("failed to serialize state: {}", e)),
        }
    }

    /// Formats milliseconds as `MM:SS.mmm`.
    pub fn format_clock(milliseconds: u64) -> String {
        let total_seconds = milliseconds / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let millis = milliseconds % 1000;
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

// ============================================================================
// Tests
// ============================================================================
