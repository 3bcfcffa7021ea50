use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Card, CardId, SetupError};

/// The two players. Red always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 2] = [PlayerColor::Red, PlayerColor::Blue];

    pub fn opponent(self) -> PlayerColor {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Red,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Blue => 1,
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerColor::Red => f.write_str("red"),
            PlayerColor::Blue => f.write_str("blue"),
        }
    }
}

/// The state for a single player during one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// The cards that have not been played yet, in the order they were dealt.
    pub(crate) hand: Vec<Card>,
}

impl PlayerState {
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// The index in the hand of the card with this id.
    pub fn position_of(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id() == Some(card))
    }

    pub(crate) fn take(&mut self, hand_idx: usize) -> Card {
        self.hand.remove(hand_idx)
    }
}

/// Shuffles the cards and deals the first half to red, the second half to blue.
///
/// Every card's id is its index in `cards`, before shuffling.
pub fn deal<R: Rng + ?Sized>(
    cards: Vec<Card>,
    rng: &mut R,
) -> Result<[PlayerState; 2], SetupError> {
    if cards.len() % 2 != 0 {
        return Err(SetupError::OddNumberOfCards(cards.len()));
    }
    let mut numbered = number_cards(cards)?;
    numbered.shuffle(rng);
    let blue = numbered.split_off(numbered.len() / 2);
    Ok(assign_hands(numbered, blue))
}

/// Deals the given hands as they are, without shuffling.
///
/// Ids are assigned as if the red and blue hands were one pool, red first.
pub fn deal_hands(red: Vec<Card>, blue: Vec<Card>) -> Result<[PlayerState; 2], SetupError> {
    if red.len() != blue.len() {
        return Err(SetupError::UnevenHands {
            red: red.len(),
            blue: blue.len(),
        });
    }
    let num_red = red.len();
    let mut numbered = number_cards(red.into_iter().chain(blue).collect())?;
    let blue = numbered.split_off(num_red);
    Ok(assign_hands(numbered, blue))
}

fn number_cards(cards: Vec<Card>) -> Result<Vec<(CardId, Card)>, SetupError> {
    if u16::try_from(cards.len()).is_err() {
        return Err(SetupError::TooManyCards(cards.len()));
    }
    Ok((0..)
        .map(CardId)
        .zip(cards)
        .collect())
}

fn assign_hands(red: Vec<(CardId, Card)>, blue: Vec<(CardId, Card)>) -> [PlayerState; 2] {
    let hand_for = |cards: Vec<(CardId, Card)>, color: PlayerColor| PlayerState {
        hand: cards
            .into_iter()
            .map(|(id, mut card)| {
                card.deal(id, color);
                card
            })
            .collect(),
    };
    [hand_for(red, PlayerColor::Red), hand_for(blue, PlayerColor::Blue)]
}
