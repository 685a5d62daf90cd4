//! Owned, serializable view of the mirrored session for renderers.

use serde::Serialize;
use std::collections::BTreeMap;

use jass_sync_types::{
    Card, GameComplete, GameId, PlayerId, RoundGuessResults, Scores, Suit, TrickEntry,
};

use crate::session::SessionPhase;
use crate::state::GameSync;
use crate::turn::TrickGeneration;

/// Everything a renderer needs, detached from the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSnapshot {
    /// Current phase
    pub phase: SessionPhase,
    /// Server session id
    pub game_id: Option<GameId>,
    /// The local player's seat
    pub local_player: Option<PlayerId>,
    /// All seats in server order
    pub players: Vec<PlayerId>,
    /// Current round number
    pub round: Option<u32>,
    /// Current trump
    pub trump_suit: Option<Suit>,
    /// Current trick number
    pub trick_number: Option<u32>,
    /// The local hand in display order
    pub hand: Vec<Card>,
    /// Playable cards; empty outside card selection
    pub legal_cards: Vec<Card>,
    /// Cards on the table
    pub trick: Vec<TrickEntry>,
    /// Turn order for the current trick
    pub player_order: Vec<PlayerId>,
    /// Index of the active seat in `player_order`
    pub active_index: usize,
    /// The active seat, if the trick is in progress
    pub active_player: Option<PlayerId>,
    /// Remaining cards per opponent
    pub opponent_card_counts: BTreeMap<PlayerId, u32>,
    /// Winner of the last resolved trick
    pub last_trick_winner: Option<PlayerId>,
    /// Last acknowledged guess
    pub last_guess: Option<u16>,
    /// Latest round summary
    pub round_summary: Option<RoundGuessResults>,
    /// Latest totals
    pub scores: Scores,
    /// Final standings
    pub final_result: Option<GameComplete>,
    /// Recent log lines, oldest first
    pub messages: Vec<String>,
    /// Current trick generation
    pub generation: TrickGeneration,
}

impl SyncSnapshot {
    /// Copy the renderable state out of `sync`.
    pub fn capture(sync: &GameSync) -> Self {
        let session = sync.session();
        let turn = sync.turn();
        Self {
            phase: session.phase(),
            game_id: session.game_id().cloned(),
            local_player: session.local_player().cloned(),
            players: session.players().to_vec(),
            round: session.round(),
            trump_suit: session.trump_suit(),
            trick_number: session.trick_number(),
            hand: sync.hand().cards().to_vec(),
            legal_cards: sync.legal_cards().to_vec(),
            trick: sync.trick().to_vec(),
            player_order: turn.order().to_vec(),
            active_index: turn.active_index(),
            active_player: turn.active_player().cloned(),
            opponent_card_counts: sync.opponents().as_map().clone(),
            last_trick_winner: sync.last_trick_winner().cloned(),
            last_guess: session.last_guess(),
            round_summary: session.round_summary().cloned(),
            scores: session.scores().clone(),
            final_result: session.final_result().cloned(),
            messages: sync.log().iter().map(str::to_string).collect(),
            generation: sync.generation(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_sync_types::{GameStarted, Rank, RoundStart, ServerEvent};

    #[test]
    fn snapshot_of_fresh_state_is_empty() {
        let snapshot = GameSync::default().snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Waiting);
        assert!(snapshot.hand.is_empty());
        assert!(snapshot.messages.is_empty());
        assert_eq!(snapshot.generation, TrickGeneration::zero());
    }

    #[test]
    fn snapshot_reflects_round() {
        let mut sync = GameSync::default();
        sync.start_game("Alice").unwrap();
        sync.handle(ServerEvent::GameStarted(GameStarted {
            game_id: GameId::from("g-7"),
            players: vec![PlayerId::from("Alice (Human)"), PlayerId::from("P2")],
        }));
        sync.handle(ServerEvent::RoundStart(RoundStart {
            round: 2,
            trump_suit: Suit::Schellen,
            hand: vec![Card::new(Suit::Rosen, Rank::Ace)],
        }));

        let snapshot = sync.snapshot();
        assert_eq!(snapshot.round, Some(2));
        assert_eq!(snapshot.trump_suit, Some(Suit::Schellen));
        assert_eq!(snapshot.hand.len(), 1);
        assert_eq!(snapshot.opponent_card_counts[&PlayerId::from("P2")], 1);
        assert_eq!(
            snapshot.messages.last().map(String::as_str),
            Some("Round 2 started! Trump suit: SCHELLEN")
        );
    }

    #[test]
    fn snapshot_serializes_phase_as_snake_case() {
        let json = GameSync::default().snapshot().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "waiting");
        assert_eq!(value["generation"], 0);
    }
}
