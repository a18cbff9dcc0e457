//! Clock engine for the chess clock.
//!
//! This module provides the core game functionality:
//! - Turn-based state transitions (Idle → Running → Finished)
//! - Elapsed-time countdown with tokio::time::interval
//! - Event firing for the presentation layer
//!
//! Elapsed time is always computed from monotonic [`Instant`] deltas rather
//! than counting fixed ticks, so scheduler delays never cause clock drift.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use crate::types::{ClockState, GameConfig, Player, MS_PER_MINUTE};

/// Cadence of the periodic tick task.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// ClockEvent
// ============================================================================

/// Clock events published to the presentation layer.
///
/// Every mutation of the clock state emits at least one event; the state is
/// consistent at the moment each event is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// A game was (re)started with the given time control
    GameStarted {
        /// Time per player in minutes
        minutes: u32,
    },
    /// The first tap started a countdown
    CountdownStarted {
        /// Player whose clock began running
        player: Player,
    },
    /// The active player tapped their clock to end their turn
    TurnPassed {
        /// Player who ended their turn
        from: Player,
        /// Player whose clock is now running
        to: Player,
    },
    /// Periodic countdown update
    Tick {
        /// Player one's remaining time in milliseconds
        player1_remaining_ms: u64,
        /// Player two's remaining time in milliseconds
        player2_remaining_ms: u64,
        /// Player whose clock is running
        active_player: Player,
    },
    /// A player's clock reached zero; the game is over
    Flagged {
        /// Player who ran out of time
        player: Player,
    },
    /// The control lock was toggled
    LockToggled {
        /// New lock state
        locked: bool,
    },
}

// ============================================================================
// ClockEngine
// ============================================================================

/// Clock engine that owns the game state and applies all mutations.
///
/// The engine is the sole owner of its [`ClockState`]; callers observe the
/// state through [`ClockEngine::state`] / [`ClockEngine::snapshot`] and the
/// event channel, never by writing fields directly.
#[derive(Debug)]
pub struct ClockEngine {
    /// Current game state
    state: ClockState,
    /// Reference point for elapsed-time computation while running
    last_tick: Option<Instant>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<ClockEvent>,
}

impl ClockEngine {
    /// Creates a new ClockEngine for the given configuration and event channel.
    ///
    /// The game starts in the Idle state; no countdown runs until the first
    /// tap.
    pub fn new(config: GameConfig, event_tx: mpsc::UnboundedSender<ClockEvent>) -> Self {
        Self {
            state: ClockState::new(config.minutes),
            last_tick: None,
            event_tx,
        }
    }

    /// Starts a fresh game with the given per-player minutes.
    ///
    /// Both clocks are set to `minutes * 60_000` ms, no player is active and
    /// the control lock is cleared. The countdown does not begin until the
    /// first tap.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero.
    pub fn start(&mut self, minutes: u32) -> Result<()> {
        if minutes == 0 {
            anyhow::bail!("time control must be at least one minute");
        }

        self.state = ClockState::new(minutes);
        self.last_tick = Some(Instant::now());

        self.event_tx
            .send(ClockEvent::GameStarted { minutes })
            .context("Failed to send game started event")?;

        Ok(())
    }

    /// Handles a tap on the given player's clock.
    ///
    /// - After the game is finished, taps are ignored.
    /// - From Idle, the tapped player's clock starts counting down.
    /// - The active player's tap commits the elapsed time to their own clock
    ///   and passes the turn to the opponent.
    /// - The inactive player's tap is ignored.
    ///
    /// Taps are deliberately not gated by the control lock; the lock only
    /// covers exit/restart controls in the presentation layer.
    pub fn tap(&mut self, player: Player) -> Result<()> {
        if self.state.finished {
            return Ok(());
        }

        match self.state.active_player {
            None => {
                self.state.active_player = Some(player);
                self.last_tick = Some(Instant::now());

                self.event_tx
                    .send(ClockEvent::CountdownStarted { player })
                    .context("Failed to send countdown started event")?;
            }
            Some(active) if active == player => {
                // Charge the time since the last tick to the player ending
                // their turn, which may flag them.
                self.apply_elapsed()?;
                if self.state.finished {
                    return Ok(());
                }

                let next = player.opponent();
                self.state.active_player = Some(next);
                self.last_tick = Some(Instant::now());

                self.event_tx
                    .send(ClockEvent::TurnPassed { from: player, to: next })
                    .context("Failed to send turn passed event")?;
            }
            Some(_) => {
                // Only the active player's tap has effect.
            }
        }

        Ok(())
    }

    /// Applies one periodic countdown update.
    ///
    /// Subtracts the wall-clock time elapsed since the last tick reference
    /// from the active player's clock, floored at zero. When the clock hits
    /// zero the game transitions to Finished. A no-op unless a player is
    /// active.
    pub fn tick(&mut self) -> Result<()> {
        if !self.state.is_running() {
            return Ok(());
        }

        self.apply_elapsed()?;

        if let Some(active) = self.state.active_player {
            self.event_tx
                .send(ClockEvent::Tick {
                    player1_remaining_ms: self.state.player1_remaining_ms,
                    player2_remaining_ms: self.state.player2_remaining_ms,
                    active_player: active,
                })
                .context("Failed to send tick event")?;
        }

        Ok(())
    }

    /// Restarts the game with the original time control, discarding all
    /// progress. Works from any state, including Finished.
    pub fn restart(&mut self) -> Result<()> {
        let minutes = (self.state.initial_duration_ms / MS_PER_MINUTE) as u32;
        self.start(minutes)
    }

    /// Toggles the advisory control lock.
    ///
    /// Never affects the countdown or the active player; enforcement is up
    /// to the caller.
    pub fn toggle_lock(&mut self) -> Result<()> {
        self.state.controls_locked = !self.state.controls_locked;

        self.event_tx
            .send(ClockEvent::LockToggled {
                locked: self.state.controls_locked,
            })
            .context("Failed to send lock toggled event")?;

        Ok(())
    }

    /// Returns a reference to the current game state.
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Returns an owned snapshot of the current game state.
    pub fn snapshot(&self) -> ClockState {
        self.state.clone()
    }

    /// Commits elapsed time to the active player and flags them at zero.
    fn apply_elapsed(&mut self) -> Result<()> {
        let Some(active) = self.state.active_player else {
            return Ok(());
        };

        let now = Instant::now();
        let elapsed_ms = match self.last_tick {
            Some(reference) => now.duration_since(reference).as_millis() as u64,
            None => 0,
        };
        self.last_tick = Some(now);

        let remaining = self.state.remaining_ms(active).saturating_sub(elapsed_ms);
        self.state.set_remaining_ms(active, remaining);

        if remaining == 0 {
            self.finish(active)?;
        }

        Ok(())
    }

    /// Transitions to the Finished state; `player` is the one who flagged.
    fn finish(&mut self, player: Player) -> Result<()> {
        self.state.finished = true;
        self.state.active_player = None;
        self.last_tick = None;

        self.event_tx
            .send(ClockEvent::Flagged { player })
            .context("Failed to send flagged event")?;

        Ok(())
    }

    /// Returns a mutable reference to the game state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut ClockState {
        &mut self.state
    }
}

// ============================================================================
// Ticker task
// ============================================================================

/// Runs the periodic tick loop for a shared engine.
///
/// Fires every [`TICK_INTERVAL`] and applies a countdown update while a
/// player is active; missed ticks are skipped rather than bursted, since
/// each tick recomputes real elapsed time anyway. The loop never exits on
/// its own — the session that spawned it aborts the task when the game
/// screen is left, so no orphaned timer can keep mutating a discarded
/// state.
pub async fn run_ticker(engine: Arc<Mutex<ClockEngine>>) -> Result<()> {
    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let mut engine = engine.lock().await;
        if !engine.state().is_running() {
            continue;
        }

        engine.tick()?;
    }
}

// ============================================================================
// Tests
// ============================================================================
