//! Play a game interactively against a server.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use jass_sync_client::{ClientError, GameClient, LineTransport, SyncSnapshot};
use jass_sync_types::{Card, Rank, Suit};

use crate::config::Config;

const HELP: &str = "\
Commands:
  guess N          submit a guess for this round
  play RANK SUIT   play a card, e.g. `play king rosen`
  play N           play the N-th card of your hand (see `hand`)
  hand             show your hand, legal cards marked with *
  state            print the full state as JSON
  reset            abandon the game locally
  quit             leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a guess.
    Guess(i64),
    /// Play a specific card.
    Play(Card),
    /// Play the card at this 1-based hand position.
    PlayIndex(usize),
    /// Show the hand.
    Hand,
    /// Dump the snapshot.
    State,
    /// Reset locally.
    Reset,
    /// Show usage.
    Help,
    /// Leave.
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command");
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("guess" | "g", [n]) => Command::Guess(
            n.parse()
                .with_context(|| format!("guess must be a number, got `{}`", n))?,
        ),
        ("play" | "p", [n]) => {
            let index: usize = n
                .parse()
                .with_context(|| format!("expected a hand position, got `{}`", n))?;
            if index == 0 {
                bail!("hand positions start at 1");
            }
            Command::PlayIndex(index)
        }
        ("play" | "p", [rank, suit]) => {
            let rank: Rank = rank.parse()?;
            let suit: Suit = suit.parse()?;
            Command::Play(Card::new(suit, rank))
        }
        ("hand" | "h", []) => Command::Hand,
        ("state" | "s", []) => Command::State,
        ("reset", []) => Command::Reset,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        _ => bail!("unrecognized command `{}` (try `help`)", line.trim()),
    };
    Ok(command)
}

/// Render the hand with 1-based positions, marking legal cards.
pub fn format_hand(snapshot: &SyncSnapshot) -> String {
    if snapshot.hand.is_empty() {
        return "(no cards)".to_string();
    }
    snapshot
        .hand
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let mark = if snapshot.legal_cards.contains(card) { "*" } else { " " };
            format!("{:>2}{} {}", i + 1, mark, card)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the play command.
pub async fn run(server: &str, name: &str, config: &Config) -> Result<()> {
    let client = Arc::new(GameClient::new(LineTransport::new(), config.sync_config()));
    client
        .connect(server)
        .await
        .with_context(|| format!("Failed to connect to {}", server))?;

    let mut notices = client.notices();
    let printer = tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => {
                    if let Some(line) = super::describe(&notice) {
                        println!("{}", line);
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!(missed, "notice output fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    client.start_reader().await;
    let mut runner = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.run().await })
    };

    client.start_game(name).await?;
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let outcome: Result<()> = loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break Ok(());
                };
                if line.trim().is_empty() {
                    continue;
                }
                match execute(&client, &line).await {
                    Ok(true) => {}
                    Ok(false) => break Ok(()),
                    Err(e) => break Err(e),
                }
            }
            finished = &mut runner => {
                break match finished {
                    Ok(Ok(())) => {
                        println!("Server closed the connection.");
                        Ok(())
                    }
                    Ok(Err(e)) => Err(e).context("Connection lost"),
                    Err(e) => Err(e).context("Client task failed"),
                };
            }
        }
    };

    runner.abort();
    let _ = client.disconnect().await;
    printer.abort();
    outcome
}

/// Apply one input line. Returns `false` when the user wants to leave.
async fn execute(client: &GameClient<LineTransport>, line: &str) -> Result<bool> {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            println!("{:#}", e);
            return Ok(true);
        }
    };

    let result = match command {
        Command::Guess(guess) => client.submit_guess(guess).await,
        Command::Play(card) => client.play_card(card).await,
        Command::PlayIndex(index) => {
            let snapshot = client.snapshot().await;
            match snapshot.hand.get(index - 1) {
                Some(card) => client.play_card(*card).await,
                None => {
                    println!("You hold {} card(s).", snapshot.hand.len());
                    Ok(())
                }
            }
        }
        Command::Hand => {
            println!("{}", format_hand(&client.snapshot().await));
            Ok(())
        }
        Command::State => {
            println!("{}", client.snapshot().await.to_json_pretty()?);
            Ok(())
        }
        Command::Reset => client.reset().await,
        Command::Help => {
            println!("{}", HELP);
            Ok(())
        }
        Command::Quit => return Ok(false),
    };

    match result {
        // Rejections are printed from the notice stream.
        Ok(()) | Err(ClientError::Rejected(_)) => Ok(true),
        Err(e) => Err(e).context("Request failed"),
    }
}
