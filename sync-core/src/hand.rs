//! The local player's hand.
//!
//! Cards are matched by value, never by position: display order is not
//! stable across re-renders, and a play may be applied twice (optimistically
//! on click, then again when the server echoes it). Removal is therefore
//! idempotent.

use jass_sync_types::Card;

/// Ordered collection of the local player's cards.
///
/// Invariant: no card appears more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand from dealt cards, dropping duplicates.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new();
        hand.replace(cards);
        hand
    }

    /// Replace the whole hand (new deal or server correction).
    ///
    /// Order is preserved; a repeated card keeps its first position.
    pub fn replace(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.clear();
        for card in cards {
            if !self.cards.contains(&card) {
                self.cards.push(card);
            }
        }
    }

    /// Remove a card by value.
    ///
    /// Returns `true` if the card was present. Removing an absent card is a
    /// no-op.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.position(card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    /// Position of a card in display order.
    pub fn position(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|c| c == card)
    }

    /// Put a card back at `index`, or at the end if the hand is shorter.
    ///
    /// Returns `false` if the card is already held.
    pub fn insert_at(&mut self, index: usize, card: Card) -> bool {
        if self.contains(&card) {
            return false;
        }
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
        true
    }

    /// Check whether the hand holds a card.
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Check whether the hand holds exactly the given cards, in any order.
    pub fn same_cards(&self, other: &[Card]) -> bool {
        let other = Hand::from_cards(other.iter().copied());
        other.len() == self.len() && other.cards.iter().all(|c| self.contains(c))
    }

    /// Number of cards held.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards in display order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over the cards in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Drop every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_sync_types::{Rank, Suit};

    fn nine_cards() -> Vec<Card> {
        Card::deck().into_iter().step_by(4).take(9).collect()
    }

    #[test]
    fn replace_keeps_order() {
        let cards = nine_cards();
        let hand = Hand::from_cards(cards.clone());
        assert_eq!(hand.cards(), cards.as_slice());
        assert_eq!(hand.len(), 9);
    }

    #[test]
    fn replace_drops_duplicates() {
        let card = Card::new(Suit::Rosen, Rank::King);
        let hand = Hand::from_cards(vec![card, card, Card::new(Suit::Rosen, Rank::Ace)]);
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.cards()[0], card);
    }

    #[test]
    fn remove_matches_by_value() {
        let cards = nine_cards();
        let mut hand = Hand::from_cards(cards.clone());
        let target = cards[4];

        assert!(hand.remove(&Card::new(target.suit, target.rank)));
        assert!(!hand.contains(&target));
        assert_eq!(hand.len(), 8);
    }

    #[test]
    fn remove_twice_changes_hand_once() {
        let cards = nine_cards();
        let mut hand = Hand::from_cards(cards.clone());

        assert!(hand.remove(&cards[0]));
        let after_first = hand.clone();
        assert!(!hand.remove(&cards[0]));

        assert_eq!(hand, after_first);
        assert_eq!(hand.len(), 8);
    }

    #[test]
    fn removing_n_cards_leaves_the_rest_exactly_once() {
        let cards = nine_cards();
        let mut hand = Hand::from_cards(cards.clone());

        for card in &cards[..5] {
            hand.remove(card);
        }

        assert_eq!(hand.len(), cards.len() - 5);
        for card in &cards[..5] {
            assert!(!hand.contains(card));
        }
        for card in &cards[5..] {
            assert_eq!(hand.iter().filter(|c| *c == card).count(), 1);
        }
    }

    #[test]
    fn same_cards_ignores_order() {
        let cards = nine_cards();
        let hand = Hand::from_cards(cards.clone());
        let mut reversed = cards.clone();
        reversed.reverse();

        assert!(hand.same_cards(&reversed));
        assert!(!hand.same_cards(&cards[..8]));

        let mut swapped = cards.clone();
        swapped[0] = Card::new(Suit::Schellen, Rank::Seven);
        assert!(!cards.contains(&swapped[0]));
        assert!(!hand.same_cards(&swapped));
    }

    #[test]
    fn insert_at_restores_removed_card_in_place() {
        let cards = nine_cards();
        let mut hand = Hand::from_cards(cards.clone());

        let slot = hand.position(&cards[3]).unwrap();
        hand.remove(&cards[3]);
        assert!(hand.insert_at(slot, cards[3]));
        assert_eq!(hand.cards(), cards.as_slice());

        assert!(!hand.insert_at(0, cards[3]));
        assert_eq!(hand.len(), 9);
    }

    #[test]
    fn insert_at_past_the_end_appends() {
        let cards = nine_cards();
        let mut hand = Hand::from_cards(cards[..2].to_vec());
        assert!(hand.insert_at(7, cards[5]));
        assert_eq!(hand.cards().last(), Some(&cards[5]));
    }

    #[test]
    fn clear_empties() {
        let mut hand = Hand::from_cards(nine_cards());
        hand.clear();
        assert!(hand.is_empty());
    }
}
