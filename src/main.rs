//! Chess Clock CLI - a two-player chess clock for the terminal
//!
//! Two clocks count down alternately; tapping your own running clock ends
//! your turn and starts the opponent's countdown. The first clock to reach
//! zero ends the game.

use anyhow::Result;
use clap::{CommandFactory, Parser};

pub mod app;
pub mod cli;
pub mod engine;
pub mod types;

use app::GameSession;
use cli::{Cli, Commands, Display};
use types::GameConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    // Set verbose logging if requested
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Play(args)) => {
            let session = GameSession::new(GameConfig::new(args.minutes), args.json)?;
            session.run().await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
