//! Interactive game session.
//!
//! This module wires the clock engine to the terminal:
//! - `input`: stdin command parsing
//!
//! One session owns the engine behind an `Arc<Mutex<_>>`, shares it with
//! the periodic ticker task, and multiplexes stdin commands, engine events
//! and Ctrl-C in a single `select!` loop. Tap and tick both go through the
//! mutex, so elapsed time can never be double-counted. The ticker task is
//! aborted when the session ends, which also covers exit-while-running.

pub mod input;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use crate::cli::Display;
use crate::engine::{run_ticker, ClockEngine, ClockEvent};
use crate::types::GameConfig;

use input::Command;

// ============================================================================
// GameSession
// ============================================================================

/// An interactive chess clock session on the terminal.
#[derive(Debug)]
pub struct GameSession {
    /// Shared clock engine (also held by the ticker task)
    engine: Arc<Mutex<ClockEngine>>,
    /// Event receiver for rendering
    event_rx: mpsc::UnboundedReceiver<ClockEvent>,
    /// Game configuration
    config: GameConfig,
    /// Render JSON snapshots instead of the human display
    json: bool,
}

impl GameSession {
    /// Creates a session for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GameConfig, json: bool) -> Result<Self> {
        if let Err(message) = config.validate() {
            anyhow::bail!(message);
        }

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Mutex::new(ClockEngine::new(config, event_tx)));

        Ok(Self {
            engine,
            event_rx,
            config,
            json,
        })
    }

    /// Runs the session until quit, EOF or Ctrl-C.
    pub async fn run(mut self) -> Result<()> {
        self.engine
            .lock()
            .await
            .start(self.config.minutes)
            .context("Failed to start game")?;

        let ticker = tokio::spawn(run_ticker(self.engine.clone()));

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                maybe_event = self.event_rx.recv() => {
                    match maybe_event {
                        Some(event) => self.render(&event).await,
                        None => break,
                    }
                }
                line = lines.next_line() => {
                    match line.context("Failed to read stdin")? {
                        Some(line) => {
                            if !self.handle_line(&line).await? {
                                break;
                            }
                        }
                        None => {
                            tracing::debug!("stdin closed, leaving game");
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("ctrl-c, leaving game");
                    break;
                }
            }
        }

        // No orphaned ticker may outlive the session and keep mutating
        // a discarded state.
        ticker.abort();

        // Events already queued when the session ends still get rendered,
        // so a tap followed by an immediate quit is not silently dropped.
        while let Ok(event) = self.event_rx.try_recv() {
            self.render(&event).await;
        }
        if !self.json {
            println!();
        }

        Ok(())
    }

    /// Handles one stdin line. Returns false when the session should end.
    async fn handle_line(&mut self, line: &str) -> Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                Display::show_error(&e.to_string());
                return Ok(true);
            }
        };
        tracing::debug!(?command, "session command");

        let mut engine = self.engine.lock().await;
        match command {
            Command::Tap(player) => engine.tap(player)?,
            Command::Lock => engine.toggle_lock()?,
            Command::Restart => {
                // The lock covers restart/exit controls only; the engine
                // itself does not check it.
                if engine.state().controls_locked {
                    Display::show_locked_refusal();
                } else {
                    engine.restart()?;
                }
            }
            Command::Quit => {
                if engine.state().controls_locked {
                    Display::show_locked_refusal();
                } else {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Renders one engine event.
    async fn render(&self, event: &ClockEvent) {
        if self.json {
            let state = self.engine.lock().await.snapshot();
            Display::show_json(&state);
            return;
        }

        match event {
            ClockEvent::GameStarted { minutes } => Display::show_game_started(*minutes),
            ClockEvent::CountdownStarted { player } => Display::show_countdown_started(*player),
            ClockEvent::Tick {
                player1_remaining_ms,
                player2_remaining_ms,
                active_player,
            } => Display::show_clocks(
                *player1_remaining_ms,
                *player2_remaining_ms,
                Some(*active_player),
            ),
            ClockEvent::TurnPassed { .. } => {
                let state = self.engine.lock().await.snapshot();
                Display::show_clocks(
                    state.player1_remaining_ms,
                    state.player2_remaining_ms,
                    state.active_player,
                );
            }
            ClockEvent::Flagged { player } => Display::show_flagged(*player),
            ClockEvent::LockToggled { locked } => Display::show_lock(*locked),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
