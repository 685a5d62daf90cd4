//! # jass-cli
//!
//! CLI tool for the Jass sync client.
//!
//! ## Commands
//!
//! - `replay`: Run a recorded server log through the client and print the result
//! - `play`: Play against a game server from the terminal
//! - `config`: Show the effective configuration
//!
//! ## Example
//!
//! ```bash
//! # Inspect where a recorded game ended up
//! jass-cli replay game.jsonl --name Alice
//!
//! # Play a game
//! jass-cli play --server 127.0.0.1:5000 --name Alice
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{config as config_cmd, play, replay};
use config::Config;

/// CLI tool for the Jass sync client.
#[derive(Parser, Debug)]
#[command(name = "jass-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: config.toml in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines log of server frames and print the final state
    Replay {
        /// Log file, one server frame per line
        file: PathBuf,

        /// Local player name (default: from config)
        #[arg(long, short)]
        name: Option<String>,

        /// Print game messages as they happen
        #[arg(long, short)]
        verbose: bool,
    },

    /// Play a game against a server
    Play {
        /// Server address (default: from config)
        #[arg(long, short)]
        server: Option<String>,

        /// Player name (default: from config)
        #[arg(long, short)]
        name: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.filter);

    match cli.command {
        Commands::Replay {
            file,
            name,
            verbose,
        } => {
            replay::run(&file, name.as_deref(), &config, verbose).await?;
        }
        Commands::Play { server, name } => {
            let server = server.unwrap_or_else(|| config.server.address.clone());
            let name = name.unwrap_or_else(|| config.player.name.clone());
            play::run(&server, &name, &config).await?;
        }
        Commands::Config => {
            config_cmd::run(&config, cli.config.as_deref())?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
