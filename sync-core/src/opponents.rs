//! Remaining-card counts for players whose hands are never seen.

use std::collections::BTreeMap;

use jass_sync_types::PlayerId;

/// Outcome of a decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrement {
    /// The count went down by one.
    Decremented {
        /// Cards left after the play
        remaining: u32,
    },
    /// The count was already zero and stays there.
    AlreadyEmpty,
    /// The player is not a tracked opponent.
    UnknownPlayer,
}

/// Per-opponent card counts.
///
/// Counts only go down within a round and never below zero. They are reset
/// uniformly at round start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpponentCounts {
    counts: BTreeMap<PlayerId, u32>,
}

impl OpponentCounts {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give every opponent the same count.
    pub fn initialize<'a>(&mut self, opponents: impl IntoIterator<Item = &'a PlayerId>, count: u32) {
        self.counts = opponents.into_iter().map(|p| (p.clone(), count)).collect();
    }

    /// Record one confirmed play by `player`.
    pub fn decrement_for(&mut self, player: &PlayerId) -> Decrement {
        match self.counts.get_mut(player) {
            Some(0) => Decrement::AlreadyEmpty,
            Some(count) => {
                *count -= 1;
                Decrement::Decremented { remaining: *count }
            }
            None => Decrement::UnknownPlayer,
        }
    }

    /// Count for one opponent.
    pub fn get(&self, player: &PlayerId) -> Option<u32> {
        self.counts.get(player).copied()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Iterate in player order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, u32)> {
        self.counts.iter().map(|(p, c)| (p, *c))
    }

    /// Whether no opponents are tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Stop tracking everyone.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<PlayerId, u32> {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opponents() -> Vec<PlayerId> {
        ["P2", "P3", "P4"].into_iter().map(PlayerId::from).collect()
    }

    #[test]
    fn initialize_is_uniform() {
        let mut counts = OpponentCounts::new();
        counts.initialize(&opponents(), 9);
        assert!(counts.iter().all(|(_, c)| c == 9));
        assert_eq!(counts.total(), 27);
    }

    #[test]
    fn decrement_reduces_one_player() {
        let mut counts = OpponentCounts::new();
        counts.initialize(&opponents(), 9);

        assert_eq!(
            counts.decrement_for(&PlayerId::from("P3")),
            Decrement::Decremented { remaining: 8 }
        );
        assert_eq!(counts.get(&PlayerId::from("P3")), Some(8));
        assert_eq!(counts.get(&PlayerId::from("P2")), Some(9));
    }

    #[test]
    fn decrement_never_goes_below_zero() {
        let mut counts = OpponentCounts::new();
        counts.initialize(&opponents(), 1);
        let p2 = PlayerId::from("P2");

        counts.decrement_for(&p2);
        assert_eq!(counts.decrement_for(&p2), Decrement::AlreadyEmpty);
        assert_eq!(counts.get(&p2), Some(0));
    }

    #[test]
    fn unknown_player_is_reported() {
        let mut counts = OpponentCounts::new();
        counts.initialize(&opponents(), 9);
        assert_eq!(
            counts.decrement_for(&PlayerId::from("Stranger")),
            Decrement::UnknownPlayer
        );
        assert_eq!(counts.total(), 27);
    }

    #[test]
    fn reinitialize_replaces_roster() {
        let mut counts = OpponentCounts::new();
        counts.initialize(&opponents(), 9);
        counts.initialize(&opponents()[..1], 5);
        assert_eq!(counts.total(), 5);
        assert!(counts.get(&PlayerId::from("P4")).is_none());
    }
}
