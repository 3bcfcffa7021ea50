mod scored;
pub use scored::*;

use serde::{Deserialize, Serialize};
use trios::{Card, CardId, Coordinate, GameView, PlayerColor};

/// A move chosen by a strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub card: CardId,
    /// The index of the card in the hand at the time the move was chosen.
    pub hand_idx: usize,
    pub position: Coordinate,
    /// How the strategy rated this move. Only comparable between moves of
    /// the same strategy.
    pub score: i64,
}

/// A trait for automated players.
pub trait Strategy {
    /// Picks a move for `player`, or returns `None` if there is none.
    ///
    /// The view can't be used to change the game, only to inspect it and to
    /// simulate moves.
    fn choose_move(&mut self, view: &dyn GameView, player: PlayerColor) -> Option<Move>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose_move(&mut self, view: &dyn GameView, player: PlayerColor) -> Option<Move> {
        (**self).choose_move(view, player)
    }
}

/// A card from the hand together with a position where it can be placed.
#[derive(Copy, Clone, Debug)]
pub struct Placement<'a> {
    pub hand_idx: usize,
    pub card: &'a Card,
    pub id: CardId,
    pub position: Coordinate,
}

impl Placement<'_> {
    pub fn scored(&self, score: i64) -> Move {
        Move {
            card: self.id,
            hand_idx: self.hand_idx,
            position: self.position,
            score,
        }
    }
}

/// All placements of cards in the player's hand.
///
/// The outer loop goes over the hand, the inner loop over the available
/// cells in row-major order.
pub fn possible_placements(view: &dyn GameView, player: PlayerColor) -> Vec<Placement<'_>> {
    let cells = view.board().empty_card_cells();
    let mut placements = Vec::with_capacity(cells.len() * view.hand(player).len());
    for (hand_idx, card) in view.hand(player).iter().enumerate() {
        // Undealt cards can't be played
        let Some(id) = card.id() else {
            continue;
        };
        placements.extend(cells.iter().map(|&position| Placement {
            hand_idx,
            card,
            id,
            position,
        }));
    }
    placements
}
