//! Session phase and the identifiers needed to address the server.

use serde::Serialize;
use std::fmt;

use jass_sync_types::{GameComplete, GameId, PlayerId, RoundGuessResults, Scores, Suit};

/// Coarse phase of the local session. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No game; before start or after reset.
    #[default]
    Waiting,
    /// A game is running and the server is not waiting on the local player.
    Playing,
    /// The server is waiting for the local player's guess.
    Guessing,
    /// The server is waiting for the local player's card.
    CardSelection,
    /// The game is over. Left only by reset.
    Finished,
}

impl SessionPhase {
    /// Snake-case name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Waiting => "waiting",
            SessionPhase::Playing => "playing",
            SessionPhase::Guessing => "guessing",
            SessionPhase::CardSelection => "card_selection",
            SessionPhase::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-assigned identity plus the results the server has reported so far.
#[derive(Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    game_id: Option<GameId>,
    local_name: Option<String>,
    human_marker: String,
    players: Vec<PlayerId>,
    local_player: Option<PlayerId>,
    opponents: Vec<PlayerId>,
    pub(crate) round: Option<u32>,
    pub(crate) trump_suit: Option<Suit>,
    pub(crate) trick_number: Option<u32>,
    pub(crate) last_guess: Option<u16>,
    pub(crate) round_summary: Option<RoundGuessResults>,
    pub(crate) scores: Scores,
    pub(crate) final_result: Option<GameComplete>,
}

impl Session {
    /// Create a session in `waiting`.
    ///
    /// `human_marker` is the suffix the server attaches to the local
    /// player's seat name (`"Alice (Human)"`).
    pub fn new(human_marker: impl Into<String>) -> Self {
        Self {
            phase: SessionPhase::Waiting,
            game_id: None,
            local_name: None,
            human_marker: human_marker.into(),
            players: Vec::new(),
            local_player: None,
            opponents: Vec::new(),
            round: None,
            trump_suit: None,
            trick_number: None,
            last_guess: None,
            round_summary: None,
            scores: Scores::new(),
            final_result: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    /// The game id, present between `game_started` and reset.
    pub fn game_id(&self) -> Option<&GameId> {
        self.game_id.as_ref()
    }

    /// Name the local player started the game with.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub(crate) fn set_local_name(&mut self, name: impl Into<String>) {
        self.local_name = Some(name.into());
    }

    /// Every seated player in server order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// The seat identified as the local player, if any.
    pub fn local_player(&self) -> Option<&PlayerId> {
        self.local_player.as_ref()
    }

    /// Seated players other than the local one, in server order.
    pub fn opponents(&self) -> &[PlayerId] {
        &self.opponents
    }

    /// Whether a player id refers to the local player.
    ///
    /// Matches the started name exactly or with the marker suffix. Without a
    /// started name, any id carrying the marker counts as local.
    pub fn is_local(&self, player: &PlayerId) -> bool {
        if self.local_player.as_ref() == Some(player) {
            return true;
        }
        let id = player.as_str();
        match &self.local_name {
            Some(name) => id == name || id == format!("{} {}", name, self.human_marker),
            None => !self.human_marker.is_empty() && id.contains(&self.human_marker),
        }
    }

    /// Record the roster from `game_started`.
    ///
    /// Returns `false` when no seat could be identified as local.
    pub(crate) fn begin(&mut self, game_id: GameId, players: Vec<PlayerId>) -> bool {
        self.game_id = Some(game_id);
        self.local_player = None;
        self.local_player = players.iter().find(|p| self.is_local(p)).cloned();
        self.opponents = players
            .iter()
            .filter(|p| Some(*p) != self.local_player.as_ref())
            .cloned()
            .collect();
        self.players = players;
        self.round = None;
        self.trump_suit = None;
        self.trick_number = None;
        self.last_guess = None;
        self.round_summary = None;
        self.scores.clear();
        self.final_result = None;
        self.phase = SessionPhase::Playing;
        self.local_player.is_some()
    }

    /// Drop everything except the local name.
    pub(crate) fn reset(&mut self) {
        let name = self.local_name.take();
        let marker = std::mem::take(&mut self.human_marker);
        *self = Session::new(marker);
        self.local_name = name;
    }

    /// Current round number, set by `round_start`.
    pub fn round(&self) -> Option<u32> {
        self.round
    }

    /// Trump for the current round.
    pub fn trump_suit(&self) -> Option<Suit> {
        self.trump_suit
    }

    /// Current trick number, set by `trick_start`.
    pub fn trick_number(&self) -> Option<u32> {
        self.trick_number
    }

    /// The last guess the server acknowledged.
    pub fn last_guess(&self) -> Option<u16> {
        self.last_guess
    }

    /// Latest round summary.
    pub fn round_summary(&self) -> Option<&RoundGuessResults> {
        self.round_summary.as_ref()
    }

    /// Latest score totals.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Final standings, once the game is over.
    pub fn final_result(&self) -> Option<&GameComplete> {
        self.final_result.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::DEFAULT_HUMAN_MARKER)
    }
}
