//! Replay a recorded server log.
//!
//! The input holds one server frame per line. Frames run through the core
//! in order. Deferred trick clears are applied as soon as they are
//! scheduled, and outbound requests are dropped.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, info, warn};

use jass_sync_client::decode_input;
use jass_sync_core::{Action, GameSync, Notice, SyncConfig, SyncSnapshot};

use crate::config::Config;

/// Result of a replay.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// State after the last frame.
    pub snapshot: SyncSnapshot,
    /// Frames applied.
    pub applied: usize,
    /// Frames that could not be decoded.
    pub skipped: usize,
}

/// Run the replay command.
pub async fn run(path: &Path, name: Option<&str>, config: &Config, verbose: bool) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read replay log {}", path.display()))?;

    let name = name.unwrap_or(config.player.name.as_str());
    let outcome = replay_frames(&text, Some(name), config.sync_config(), |notice| {
        if verbose {
            if let Some(line) = super::describe(notice) {
                println!("{}", line);
            }
        }
    })?;

    info!(
        applied = outcome.applied,
        skipped = outcome.skipped,
        "replay finished"
    );
    println!("{}", outcome.snapshot.to_json_pretty()?);
    Ok(())
}

/// Feed every frame in `text` through a fresh state machine.
///
/// `on_notice` sees each notice in emission order.
pub fn replay_frames<F>(
    text: &str,
    player_name: Option<&str>,
    config: SyncConfig,
    mut on_notice: F,
) -> Result<ReplayOutcome>
where
    F: FnMut(&Notice),
{
    let mut sync = GameSync::new(config);
    if let Some(name) = player_name {
        sync.start_game(name).context("Invalid player name")?;
    }

    let mut applied = 0;
    let mut skipped = 0;
    for (index, line) in text.lines().enumerate() {
        let frame = line.trim();
        if frame.is_empty() {
            continue;
        }
        let input = match decode_input(frame) {
            Ok(input) => input,
            Err(error) => {
                warn!(line = index + 1, %error, "skipping undecodable frame");
                skipped += 1;
                continue;
            }
        };

        let mut pending: VecDeque<Action> = sync.on_input(input).into();
        while let Some(action) = pending.pop_front() {
            match action {
                Action::Emit(notice) => on_notice(&notice),
                Action::ScheduleTrickClear { generation, .. } => {
                    pending.extend(sync.trick_clear_elapsed(generation));
                }
                Action::Send(request) => debug!(?request, "replay drops outbound request"),
                Action::CancelTrickClear => {}
            }
        }
        applied += 1;
    }

    Ok(ReplayOutcome {
        snapshot: sync.snapshot(),
        applied,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_sync_core::SessionPhase;
    use jass_sync_types::PlayerId;
    use tempfile::tempdir;

    const LOG: &str = r#"
{"event":"connected","data":{"message":"Connected to Jass game server"}}
{"event":"game_started","data":{"game_id":"g-42","players":["Alice (Human)","Bot A","Bot B","Bot C"]}}
{"event":"round_start","data":{"round":1,"trump_suit":"ROSEN","hand":[{"suit":"ROSEN","rank":"KING"},{"suit":"EICHELN","rank":"NINE"}]}}
{"event":"trick_start","data":{"trick_number":1,"player_order":["Bot A","Bot B","Bot C","Alice (Human)"]}}
{"event":"card_played","data":{"player":"Bot A","card":{"suit":"ROSEN","rank":"SIX"}}}
"#;

    fn replay(text: &str) -> (ReplayOutcome, Vec<Notice>) {
        let mut notices = Vec::new();
        let outcome = replay_frames(text, Some("Alice"), SyncConfig::default(), |n| {
            notices.push(n.clone())
        })
        .unwrap();
        (outcome, notices)
    }

    #[test]
    fn replay_reaches_mid_trick_state() {
        let (outcome, _) = replay(LOG);
        let snapshot = outcome.snapshot;

        assert_eq!(outcome.applied, 5);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(snapshot.phase, SessionPhase::Playing);
        assert_eq!(snapshot.local_player, Some(PlayerId::from("Alice (Human)")));
        assert_eq!(snapshot.hand.len(), 2);
        assert_eq!(snapshot.opponent_card_counts[&PlayerId::from("Bot A")], 1);
        assert_eq!(snapshot.opponent_card_counts[&PlayerId::from("Bot B")], 2);
        assert_eq!(snapshot.active_player, Some(PlayerId::from("Bot B")));
    }

    #[test]
    fn replay_reports_message_lines() {
        let (_, notices) = replay(LOG);
        let lines: Vec<String> = notices.iter().filter_map(crate::commands::describe).collect();

        assert!(lines.contains(&"Connected to game server".to_string()));
        assert!(lines.contains(&"Round 1 started! Trump suit: ROSEN".to_string()));
    }

    #[test]
    fn replay_skips_garbage_and_unknown_kinds() {
        let text = format!("not json\n{{\"event\":\"lobby\",\"data\":{{}}}}\n{}", LOG);
        let (outcome, _) = replay(&text);

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.applied, 6);
        assert_eq!(outcome.snapshot.phase, SessionPhase::Playing);
    }

    #[test]
    fn replay_applies_trick_clear_immediately() {
        let text = format!(
            "{}{}\n",
            LOG,
            r#"{"event":"trick_complete","data":{"winner":"Bot A","trick":[]}}"#
        );
        let (outcome, _) = replay(&text);

        assert!(outcome.snapshot.trick.is_empty());
        assert!(outcome.snapshot.last_trick_winner.is_none());
    }

    #[test]
    fn blank_name_is_an_error() {
        let result = replay_frames(LOG, Some("  "), SyncConfig::default(), |_| {});
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_reads_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.jsonl");
        tokio::fs::write(&path, LOG).await.unwrap();

        let result = run(&path, Some("Alice"), &Config::default(), false).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = run(&dir.path().join("nope.jsonl"), None, &Config::default(), false).await;
        assert!(result.is_err());
    }
}
