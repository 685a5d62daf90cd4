//! The server's latest grant of playable cards.
//!
//! The client never computes legality. Membership is whatever the most
//! recent `request_card` said, and nothing at all outside card selection.

use jass_sync_types::Card;

/// Set of cards the server will currently accept from the local player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalityGate {
    granted: Vec<Card>,
}

impl LegalityGate {
    /// Create an empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the granted set.
    pub fn grant(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.granted.clear();
        for card in cards {
            if !self.granted.contains(&card) {
                self.granted.push(card);
            }
        }
    }

    /// Whether `card` is in the granted set.
    pub fn is_legal(&self, card: &Card) -> bool {
        self.granted.contains(card)
    }

    /// Revoke the grant.
    pub fn clear(&mut self) {
        self.granted.clear();
    }

    /// Granted cards in server order.
    pub fn granted(&self) -> &[Card] {
        &self.granted
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}
