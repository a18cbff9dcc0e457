//! Command definitions for the chess clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Chess Clock CLI - a two-player chess clock for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "chessclock",
    version,
    about = "Two-player chess clock for the terminal",
    long_about = "A turn-based chess clock. Pick a time control, then tap to pass\n\
                  the turn: `1` and `2` tap a player's clock, `r` restarts,\n\
                  `l` locks the controls, `q` quits.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a game and run the interactive clock
    Play(PlayArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Play Command Arguments
// ============================================================================

/// Arguments for the play command
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Time per player in minutes (1-600)
    #[arg(
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=600)
    )]
    pub minutes: u32,

    /// Print state snapshots as JSON lines instead of the human display
    #[arg(short, long)]
    pub json: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            minutes: 5,
            json: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
