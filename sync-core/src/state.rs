//! Game sync state machine for jass-sync.
//!
//! [`GameSync`] mirrors the server's game session. It takes one input at a
//! time (a server event, a local player action, or an elapsed timer) and
//! returns a list of [`Action`]s for the driver to execute. It performs no
//! I/O itself.
//!
//! Server events are applied in a fixed order per kind: the session phase
//! first, then the derived state (turn order, legality, hand, opponent
//! counts). Inconsistencies between events are repaired locally by clamping
//! or ignoring, reported as [`Notice::Inconsistency`], and never fail.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use jass_sync_types::{
    Card, CardPlayed, ClientRequest, EventKind, GameComplete, GameStarted, MakeGuess, PlayCard,
    PlayerId, RequestCard, RequestGuess, RoundComplete, RoundGuessResults, RoundStart,
    ServerEvent, StartGame, TrickComplete, TrickEntry, TrickStart, MAX_GUESS,
};

use crate::hand::Hand;
use crate::legality::LegalityGate;
use crate::log::{MessageLog, DEFAULT_LOG_CAPACITY};
use crate::opponents::{Decrement, OpponentCounts};
use crate::session::{Session, SessionPhase};
use crate::snapshot::SyncSnapshot;
use crate::turn::{Advance, TrickGeneration, TurnOrder};

/// How long a resolved trick stays visible before it is cleared.
pub const DEFAULT_TRICK_CLEAR_DELAY: Duration = Duration::from_millis(3000);

/// Suffix the server appends to the local player's seat name.
pub const DEFAULT_HUMAN_MARKER: &str = "(Human)";

/// Tunables for [`GameSync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Delay before a resolved trick is cleared from view.
    pub trick_clear_delay: Duration,
    /// Largest guess accepted from the local player.
    pub max_guess: u16,
    /// Number of retained message log lines.
    pub message_log_capacity: usize,
    /// Suffix identifying the local player's seat.
    pub human_marker: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            trick_clear_delay: DEFAULT_TRICK_CLEAR_DELAY,
            max_guess: MAX_GUESS,
            message_log_capacity: DEFAULT_LOG_CAPACITY,
            human_marker: DEFAULT_HUMAN_MARKER.to_string(),
        }
    }
}

impl SyncConfig {
    /// Set the trick clear delay.
    pub fn with_trick_clear_delay(mut self, delay: Duration) -> Self {
        self.trick_clear_delay = delay;
        self
    }

    /// Set the largest accepted guess.
    pub fn with_max_guess(mut self, max_guess: u16) -> Self {
        self.max_guess = max_guess;
        self
    }

    /// Set the message log capacity.
    pub fn with_message_log_capacity(mut self, capacity: usize) -> Self {
        self.message_log_capacity = capacity;
        self
    }

    /// Set the local seat marker.
    pub fn with_human_marker(mut self, marker: impl Into<String>) -> Self {
        self.human_marker = marker.into();
        self
    }
}

/// Everything that can drive the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A decoded server event.
    Server(ServerEvent),
    /// A server event of a kind this client does not know.
    Unrecognized {
        /// Event name as received
        kind: String,
    },
    /// The local player asked to start a game.
    StartGame {
        /// Name to play under
        player_name: String,
    },
    /// The local player submitted a guess.
    SubmitGuess {
        /// Raw guess as entered
        guess: i64,
    },
    /// The local player clicked a card.
    PlayCard {
        /// The card clicked
        card: Card,
    },
    /// The local player asked to abandon the session.
    Reset,
    /// A deferred trick clear fired.
    TrickClearElapsed {
        /// Generation the clear was scheduled for
        generation: TrickGeneration,
    },
}

/// Instructions for the driver.
///
/// These are instructions, not side effects. The driver performs the
/// actual I/O and timer management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a request to the server.
    Send(ClientRequest),
    /// Arm the deferred trick clear, replacing any armed one.
    ScheduleTrickClear {
        /// Generation to hand back when the timer fires
        generation: TrickGeneration,
        /// How long to wait
        delay: Duration,
    },
    /// Disarm the deferred trick clear.
    CancelTrickClear,
    /// Notify the application.
    Emit(Notice),
}

/// Notifications for renderers and the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Mirrored state changed; take a fresh snapshot.
    StateChanged,
    /// A local action was refused and not forwarded.
    Rejected(Rejection),
    /// The server reported an error.
    ServerError(String),
    /// Events disagreed with tracked state and were repaired locally.
    Inconsistency(Inconsistency),
    /// A line was added to the message log.
    Message(String),
}

/// Why a local action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The card is not in the server's latest grant
    #[error("rejected: illegal card {0}")]
    IllegalCard(Card),

    /// The action is not available in the current phase
    #[error("rejected: cannot {action} while {phase}")]
    WrongPhase {
        /// What was attempted
        action: &'static str,
        /// Phase at the time
        phase: SessionPhase,
    },

    /// No game id has been assigned yet
    #[error("rejected: no active game")]
    NoActiveGame,

    /// Guess outside `0..=max`
    #[error("rejected: guess {guess} is outside 0..={max}")]
    GuessOutOfRange {
        /// The guess as entered
        guess: i64,
        /// Largest accepted guess
        max: u16,
    },

    /// Player name empty after trimming
    #[error("rejected: player name must not be blank")]
    BlankName,
}

/// A disagreement between the event stream and tracked state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Inconsistency {
    /// An opponent played with no cards left
    #[error("{player} played with no cards left")]
    CountUnderflow {
        /// The opponent
        player: PlayerId,
    },

    /// A card was played by a player not seated at this table
    #[error("card played by unknown player {player}")]
    UnknownPlayer {
        /// The unknown player
        player: PlayerId,
    },

    /// A play arrived after every seat had played
    #[error("{player} played after the trick was complete")]
    TurnOverrun {
        /// The late player
        player: PlayerId,
    },

    /// A play arrived from someone other than the active seat
    #[error("{player} played out of turn, expected {expected}")]
    OutOfTurn {
        /// Who played
        player: PlayerId,
        /// Whose turn it was
        expected: PlayerId,
    },

    /// The server confirmed a local play of a card the hand never held
    #[error("local play of {card} not found in hand")]
    UnknownLocalCard {
        /// The confirmed card
        card: Card,
    },

    /// A granted card is not in the tracked hand
    #[error("legal card {card} is not in hand")]
    LegalCardNotInHand {
        /// The granted card
        card: Card,
    },

    /// The server's view of the hand differs from the tracked one
    #[error("hand mismatch: tracked {tracked} cards, server has {server}")]
    HandMismatch {
        /// Cards tracked locally
        tracked: usize,
        /// Cards the server reported
        server: usize,
    },

    /// A card was requested while another seat was active
    #[error("card requested while {active:?} is active")]
    NotLocalTurn {
        /// Active seat at the time, if any
        active: Option<PlayerId>,
    },

    /// No seat in the roster matches the local player
    #[error("no seat in the roster belongs to the local player")]
    LocalSeatMissing,
}

/// A local play sent to the server and not yet echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingPlay {
    card: Card,
    /// Hand position the card was taken from
    slot: usize,
    /// Grant in force when the card was played
    grant: Vec<Card>,
    /// The server acknowledged the play to this client alone
    acknowledged: bool,
}

/// Local mirror of one server-driven game session. NO I/O.
#[derive(Debug, Clone)]
pub struct GameSync {
    config: SyncConfig,
    session: Session,
    hand: Hand,
    legality: LegalityGate,
    turn: TurnOrder,
    trick: Vec<TrickEntry>,
    last_trick_winner: Option<PlayerId>,
    opponents: OpponentCounts,
    log: MessageLog,
    generation: TrickGeneration,
    pending_clear: Option<TrickGeneration>,
    pending_play: Option<PendingPlay>,
}

impl GameSync {
    /// Create a state machine in `waiting`.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            session: Session::new(config.human_marker.clone()),
            hand: Hand::new(),
            legality: LegalityGate::new(),
            turn: TurnOrder::new(),
            trick: Vec::new(),
            last_trick_winner: None,
            opponents: OpponentCounts::new(),
            log: MessageLog::new(config.message_log_capacity),
            generation: TrickGeneration::zero(),
            pending_clear: None,
            pending_play: None,
            config,
        }
    }

    /// Process one input and return the actions to execute.
    ///
    /// Refused local actions come back as [`Notice::Rejected`].
    pub fn on_input(&mut self, input: Input) -> Vec<Action> {
        let result = match input {
            Input::Server(event) => Ok(self.handle(event)),
            Input::Unrecognized { kind } => Ok(self.unrecognized(&kind)),
            Input::StartGame { player_name } => self.start_game(&player_name),
            Input::SubmitGuess { guess } => self.submit_guess(guess),
            Input::PlayCard { card } => self.play_card(card),
            Input::Reset => Ok(self.reset()),
            Input::TrickClearElapsed { generation } => Ok(self.trick_clear_elapsed(generation)),
        };
        result.unwrap_or_else(|rejection| vec![Action::Emit(Notice::Rejected(rejection))])
    }

    // =========================================================================
    // Server events
    // =========================================================================

    /// Apply one server event.
    pub fn handle(&mut self, event: ServerEvent) -> Vec<Action> {
        debug!(kind = %EventKind::from(&event), phase = %self.session.phase(), "applying server event");

        let mut actions = Vec::new();
        match event {
            ServerEvent::Connected(connected) => {
                info!(greeting = %connected.message, "connected to game server");
                self.note(&mut actions, "Connected to game server".to_string());
            }
            ServerEvent::GameStarted(started) => self.game_started(started, &mut actions),
            ServerEvent::RoundStart(round) => self.round_start(round, &mut actions),
            ServerEvent::RequestGuess(request) => self.request_guess(request, &mut actions),
            ServerEvent::GuessReceived(ack) => {
                self.session.last_guess = Some(ack.guess);
                self.note(&mut actions, format!("Guess of {} points received", ack.guess));
            }
            ServerEvent::RoundGuessResults(summary) => self.round_guess_results(summary, &mut actions),
            ServerEvent::TrickStart(start) => self.trick_start(start, &mut actions),
            ServerEvent::RequestCard(request) => self.request_card(request, &mut actions),
            ServerEvent::CardPlayed(played) => self.card_played(played, &mut actions),
            ServerEvent::TrickComplete(complete) => self.trick_complete(complete, &mut actions),
            ServerEvent::RoundComplete(complete) => self.round_complete(complete, &mut actions),
            ServerEvent::GameComplete(complete) => self.game_complete(complete, &mut actions),
            ServerEvent::Error(error) => {
                warn!(reason = %error.message, "server reported an error");
                self.note(&mut actions, format!("Error: {}", error.message));
                actions.push(Action::Emit(Notice::ServerError(error.message)));
            }
        }
        actions.push(Action::Emit(Notice::StateChanged));
        actions
    }

    /// Note an event kind this client does not understand. No state changes.
    pub fn unrecognized(&mut self, kind: &str) -> Vec<Action> {
        warn!(kind, "ignoring unknown server event");
        Vec::new()
    }

    fn game_started(&mut self, started: GameStarted, actions: &mut Vec<Action>) {
        let GameStarted { game_id, players } = started;
        info!(game_id = ?game_id, players = players.len(), "game started");
        let seated = self.session.begin(game_id, players);

        self.clear_table(actions);
        self.hand.clear();
        self.opponents.clear();
        if !seated {
            self.inconsistent(actions, Inconsistency::LocalSeatMissing);
        }

        let names: Vec<&str> = self.session.opponents().iter().map(PlayerId::as_str).collect();
        let line = format!("Game started! Playing against: {}", names.join(", "));
        self.note(actions, line);
    }

    fn round_start(&mut self, round: RoundStart, actions: &mut Vec<Action>) {
        self.session.round = Some(round.round);
        self.session.trump_suit = Some(round.trump_suit);
        self.session.trick_number = None;

        self.clear_table(actions);
        self.hand.replace(round.hand);
        let dealt = self.hand.len() as u32;
        self.opponents.initialize(self.session.opponents(), dealt);

        info!(round = round.round, trump = %round.trump_suit, dealt, "round started");
        self.note(
            actions,
            format!("Round {} started! Trump suit: {}", round.round, round.trump_suit),
        );
    }

    fn request_guess(&mut self, request: RequestGuess, actions: &mut Vec<Action>) {
        self.session.set_phase(SessionPhase::Guessing);
        self.legality.clear();
        self.session.trump_suit = Some(request.trump_suit);

        if !self.hand.same_cards(&request.hand) {
            self.inconsistent(
                actions,
                Inconsistency::HandMismatch {
                    tracked: self.hand.len(),
                    server: request.hand.len(),
                },
            );
            self.hand.replace(request.hand);
            let dealt = self.hand.len() as u32;
            self.opponents.initialize(self.session.opponents(), dealt);
        }
    }

    fn round_guess_results(&mut self, summary: RoundGuessResults, actions: &mut Vec<Action>) {
        self.session.scores = summary.round_data.scores.clone();
        self.note(actions, "--- Round Results ---".to_string());
        for result in &summary.results {
            let line = format!(
                "Player {} guessed {} points, scored {}, difference: {}",
                result.player, result.guess, result.actual, result.difference
            );
            self.note(actions, line);
        }
        self.session.round_summary = Some(summary);
    }

    fn trick_start(&mut self, start: TrickStart, actions: &mut Vec<Action>) {
        if self.pending_clear.take().is_some() {
            actions.push(Action::CancelTrickClear);
        }
        self.generation = self.generation.next();
        self.trick.clear();
        self.last_trick_winner = None;
        self.turn.start(start.player_order);
        self.session.trick_number = Some(start.trick_number);

        debug!(
            trick = start.trick_number,
            generation = self.generation.value(),
            leader = ?self.turn.active_player(),
            "trick started"
        );
        self.note(actions, format!("Trick {} started", start.trick_number));
    }

    fn request_card(&mut self, request: RequestCard, actions: &mut Vec<Action>) {
        self.session.set_phase(SessionPhase::CardSelection);
        self.legality.grant(request.legal_cards);
        self.trick = request.current_trick;
        self.pending_play = None;

        let missing: Vec<Card> = self
            .legality
            .granted()
            .iter()
            .filter(|card| !self.hand.contains(card))
            .copied()
            .collect();
        for card in missing {
            self.inconsistent(actions, Inconsistency::LegalCardNotInHand { card });
        }

        if !self.turn.order().is_empty() {
            let active = self.turn.active_player().cloned();
            let local_turn = active.as_ref().is_some_and(|p| self.session.is_local(p));
            if !local_turn {
                self.inconsistent(actions, Inconsistency::NotLocalTurn { active });
            }
        }

        self.note(actions, "Your turn! Select a card to play.".to_string());
    }

    fn card_played(&mut self, played: CardPlayed, actions: &mut Vec<Action>) {
        let card = played.played_card();
        let CardPlayed {
            player,
            trick,
            message,
            ..
        } = played;

        let (player, card) = match (player, card) {
            (Some(player), Some(card)) => (player, card),
            (None, Some(card)) => {
                self.play_acknowledged(card);
                return;
            }
            (_, None) => {
                // Announcement only (last-trick bonus)
                if let Some(message) = message {
                    self.note(actions, message);
                }
                return;
            }
        };

        match trick {
            Some(trick) => self.trick = trick,
            None => {
                let entry = TrickEntry {
                    player: player.clone(),
                    card,
                };
                if !self.trick.contains(&entry) {
                    self.trick.push(entry);
                }
            }
        }
        self.note(actions, format!("{} played {}", player, card));

        if self.session.is_local(&player) {
            let removed = self.hand.remove(&card);
            let was_pending = self.pending_play.take().is_some_and(|p| p.card == card);
            if !removed && !was_pending {
                self.inconsistent(actions, Inconsistency::UnknownLocalCard { card });
            }
            if self.session.phase() == SessionPhase::CardSelection {
                self.session.set_phase(SessionPhase::Playing);
                self.legality.clear();
            }
        } else {
            match self.opponents.decrement_for(&player) {
                Decrement::Decremented { remaining } => {
                    debug!(player = %player, remaining, "opponent played");
                }
                Decrement::AlreadyEmpty => {
                    self.inconsistent(
                        actions,
                        Inconsistency::CountUnderflow {
                            player: player.clone(),
                        },
                    );
                }
                Decrement::UnknownPlayer => {
                    self.inconsistent(
                        actions,
                        Inconsistency::UnknownPlayer {
                            player: player.clone(),
                        },
                    );
                }
            }
        }

        let expected = self.turn.active_player().cloned();
        match self.turn.advance() {
            Advance::Overrun => {
                self.inconsistent(actions, Inconsistency::TurnOverrun { player });
            }
            Advance::Next(_) | Advance::Completed => {
                if let Some(expected) = expected.filter(|expected| *expected != player) {
                    self.inconsistent(actions, Inconsistency::OutOfTurn { player, expected });
                }
            }
        }
    }

    /// The server confirmed the local play to this client alone.
    ///
    /// The room broadcast of the same play may arrive before or after; the
    /// broadcast is what appends to the trick and advances the turn.
    fn play_acknowledged(&mut self, card: Card) {
        self.hand.remove(&card);
        match self.pending_play.as_mut() {
            Some(pending) if pending.card == card => pending.acknowledged = true,
            _ => debug!(card = %card, "acknowledged play has no pending entry"),
        }
        if self.session.phase() == SessionPhase::CardSelection {
            self.session.set_phase(SessionPhase::Playing);
            self.legality.clear();
        }
        debug!(card = %card, "server acknowledged local play");
    }

    fn trick_complete(&mut self, complete: TrickComplete, actions: &mut Vec<Action>) {
        self.session.set_phase(SessionPhase::Playing);
        self.legality.clear();
        self.turn.clear();
        self.pending_play = None;

        if !complete.trick.is_empty() {
            self.trick = complete.trick;
        }
        self.note(actions, format!("{} won the trick!", complete.winner));
        self.last_trick_winner = Some(complete.winner);

        self.pending_clear = Some(self.generation);
        actions.push(Action::ScheduleTrickClear {
            generation: self.generation,
            delay: self.config.trick_clear_delay,
        });
    }

    fn round_complete(&mut self, complete: RoundComplete, actions: &mut Vec<Action>) {
        self.session.scores = complete.scores;
        let line = match complete.round {
            Some(round) => format!("Round {} complete!", round),
            None => "Round complete!".to_string(),
        };
        self.note(actions, line);
    }

    fn game_complete(&mut self, complete: GameComplete, actions: &mut Vec<Action>) {
        self.session.set_phase(SessionPhase::Finished);
        self.legality.clear();
        self.pending_play = None;

        info!(winner = %complete.winner, "game complete");
        self.note(actions, format!("Game complete! Winner: {}", complete.winner));
        self.session.scores = complete.final_scores.clone();
        self.session.final_result = Some(complete);
    }

    // =========================================================================
    // Local actions
    // =========================================================================

    /// Ask the server for a new game under `player_name`.
    pub fn start_game(&mut self, player_name: &str) -> Result<Vec<Action>, Rejection> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(Rejection::BlankName);
        }
        self.session.set_local_name(name);
        info!(player = name, "requesting new game");

        Ok(vec![
            Action::Send(ClientRequest::StartGame(StartGame {
                player_name: name.to_string(),
            })),
            Action::Emit(Notice::StateChanged),
        ])
    }

    /// Submit a guess for the current round.
    pub fn submit_guess(&mut self, guess: i64) -> Result<Vec<Action>, Rejection> {
        let game_id = self.session.game_id().cloned().ok_or(Rejection::NoActiveGame)?;
        if self.session.phase() != SessionPhase::Guessing {
            return Err(Rejection::WrongPhase {
                action: "guess",
                phase: self.session.phase(),
            });
        }
        let max = self.config.max_guess;
        let guess = u16::try_from(guess)
            .ok()
            .filter(|g| *g <= max)
            .ok_or(Rejection::GuessOutOfRange { guess, max })?;

        let mut actions = vec![Action::Send(ClientRequest::MakeGuess(MakeGuess {
            game_id,
            guess,
        }))];
        self.note(&mut actions, "You made your guess".to_string());
        actions.push(Action::Emit(Notice::StateChanged));
        Ok(actions)
    }

    /// Play a card from the local hand.
    ///
    /// On success the card leaves the hand immediately and the grant is
    /// revoked, so a second click is refused until the server asks again.
    pub fn play_card(&mut self, card: Card) -> Result<Vec<Action>, Rejection> {
        let game_id = self.session.game_id().cloned().ok_or(Rejection::NoActiveGame)?;
        if self.session.phase() != SessionPhase::CardSelection {
            return Err(Rejection::WrongPhase {
                action: "play a card",
                phase: self.session.phase(),
            });
        }
        if !self.is_legal(&card) {
            return Err(Rejection::IllegalCard(card));
        }

        let slot = self.hand.position(&card).unwrap_or(self.hand.len());
        self.hand.remove(&card);
        self.pending_play = Some(PendingPlay {
            card,
            slot,
            grant: self.legality.granted().to_vec(),
            acknowledged: false,
        });
        self.legality.clear();
        debug!(card = %card, "playing card");

        Ok(vec![
            Action::Send(ClientRequest::PlayCard(PlayCard {
                game_id,
                card_suit: card.suit,
                card_rank: card.rank,
            })),
            Action::Emit(Notice::StateChanged),
        ])
    }

    /// Undo a play whose request never reached the server.
    ///
    /// Puts the card back in its hand position and restores the grant, so the
    /// player can try again. Does nothing unless `card` is the unconfirmed
    /// pending play.
    pub fn play_not_sent(&mut self, card: Card) -> Vec<Action> {
        let restorable = self
            .pending_play
            .as_ref()
            .is_some_and(|p| p.card == card && !p.acknowledged);
        if !restorable || self.session.phase() != SessionPhase::CardSelection {
            debug!(card = %card, "no unsent play to undo");
            return Vec::new();
        }
        let Some(pending) = self.pending_play.take() else {
            return Vec::new();
        };

        warn!(card = %card, "play was not sent, returning card to hand");
        self.hand.insert_at(pending.slot, card);
        self.legality.grant(pending.grant);
        vec![Action::Emit(Notice::StateChanged)]
    }

    /// Abandon the session and return to `waiting`.
    ///
    /// Keeps the local player's name and the trick generation.
    pub fn reset(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.clear_table(&mut actions);
        self.session.reset();
        self.hand.clear();
        self.opponents.clear();
        self.log.clear();
        info!("session reset");

        actions.push(Action::Emit(Notice::StateChanged));
        actions
    }

    /// Apply a deferred trick clear if it still belongs to the current trick.
    pub fn trick_clear_elapsed(&mut self, generation: TrickGeneration) -> Vec<Action> {
        if self.pending_clear != Some(generation) || generation != self.generation {
            debug!(
                stale = generation.value(),
                current = self.generation.value(),
                "discarding stale trick clear"
            );
            return Vec::new();
        }
        self.pending_clear = None;
        self.trick.clear();
        self.last_trick_winner = None;
        vec![Action::Emit(Notice::StateChanged)]
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the local player may play `card` right now.
    pub fn is_legal(&self, card: &Card) -> bool {
        self.session.phase() == SessionPhase::CardSelection && self.legality.is_legal(card)
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Session identity and results.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The local hand.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Cards currently playable. Empty outside card selection.
    pub fn legal_cards(&self) -> &[Card] {
        if self.session.phase() == SessionPhase::CardSelection {
            self.legality.granted()
        } else {
            &[]
        }
    }

    /// Cards on the table.
    pub fn trick(&self) -> &[TrickEntry] {
        &self.trick
    }

    /// Turn order for the current trick.
    pub fn turn(&self) -> &TurnOrder {
        &self.turn
    }

    /// Winner of the last resolved trick, until it is cleared.
    pub fn last_trick_winner(&self) -> Option<&PlayerId> {
        self.last_trick_winner.as_ref()
    }

    /// Remaining cards per opponent.
    pub fn opponents(&self) -> &OpponentCounts {
        &self.opponents
    }

    /// Recent human-readable messages.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Current trick generation.
    pub fn generation(&self) -> TrickGeneration {
        self.generation
    }

    /// Whether a deferred trick clear is armed.
    pub fn has_pending_clear(&self) -> bool {
        self.pending_clear.is_some()
    }

    /// Configuration in use.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Owned copy of everything a renderer needs.
    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot::capture(self)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Drop per-trick state and disarm any pending clear.
    fn clear_table(&mut self, actions: &mut Vec<Action>) {
        if self.pending_clear.take().is_some() {
            actions.push(Action::CancelTrickClear);
        }
        self.trick.clear();
        self.last_trick_winner = None;
        self.turn.clear();
        self.legality.clear();
        self.pending_play = None;
    }

    fn note(&mut self, actions: &mut Vec<Action>, line: String) {
        self.log.push(line.clone());
        actions.push(Action::Emit(Notice::Message(line)));
    }

    fn inconsistent(&self, actions: &mut Vec<Action>, issue: Inconsistency) {
        warn!(%issue, phase = %self.session.phase(), "repairing state inconsistency");
        actions.push(Action::Emit(Notice::Inconsistency(issue)));
    }
}

impl Default for GameSync {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}
