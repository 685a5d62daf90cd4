//! Turn order within a trick, and the generation tag for deferred clears.

use serde::Serialize;

use jass_sync_types::PlayerId;

/// Counter bumped on every trick start.
///
/// A deferred trick clear carries the generation it was scheduled for; a
/// clear whose generation is no longer current belongs to an older trick
/// and must be discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TrickGeneration(u64);

impl TrickGeneration {
    /// Create a generation with a specific value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The initial generation (before any trick).
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The following generation. Saturates at `u64::MAX`.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Outcome of advancing the turn after a confirmed play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The turn passed to this player.
    Next(PlayerId),
    /// Every player has played; waiting for resolution.
    Completed,
    /// A play arrived after the trick was already complete. Nothing changed.
    Overrun,
}

/// Player order for the current trick and the index of the active seat.
///
/// `0 <= active_index <= order.len()`; `active_index == order.len()` means
/// the trick is fully played and awaiting resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOrder {
    order: Vec<PlayerId>,
    active_index: usize,
}

impl TurnOrder {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a trick: the first player in `order` is active.
    pub fn start(&mut self, order: Vec<PlayerId>) {
        self.order = order;
        self.active_index = 0;
    }

    /// Forget the trick's order.
    pub fn clear(&mut self) {
        self.order.clear();
        self.active_index = 0;
    }

    /// Move to the next seat.
    ///
    /// Never moves past `order.len()`.
    pub fn advance(&mut self) -> Advance {
        if self.is_complete() {
            return Advance::Overrun;
        }
        self.active_index += 1;
        match self.order.get(self.active_index) {
            Some(player) => Advance::Next(player.clone()),
            None => Advance::Completed,
        }
    }

    /// The player whose turn it is, if the trick is in progress.
    pub fn active_player(&self) -> Option<&PlayerId> {
        self.order.get(self.active_index)
    }

    /// Index of the active seat.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Order for the current trick.
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Whether every seat has played (or no trick is running).
    pub fn is_complete(&self) -> bool {
        self.active_index >= self.order.len()
    }
}
