use std::cmp::Ordering;

use tracing::debug;
use trios::{Card, Coordinate, GamePhase, GameView, PlayerColor};

use crate::{possible_placements, Move, Strategy};

/// Rates a single placement. Higher is better.
pub trait MoveEvaluator {
    fn evaluate(
        &self,
        view: &dyn GameView,
        player: PlayerColor,
        card: &Card,
        pos: Coordinate,
    ) -> i64;
}

impl<F> MoveEvaluator for F
where
    F: Fn(&dyn GameView, PlayerColor, &Card, Coordinate) -> i64,
{
    fn evaluate(
        &self,
        view: &dyn GameView,
        player: PlayerColor,
        card: &Card,
        pos: Coordinate,
    ) -> i64 {
        self(view, player, card, pos)
    }
}

/// Which card to prefer when moves are tied in score and position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HandTieBreak {
    /// The card that comes first in the hand.
    #[default]
    LowestIndex,
    /// The card that comes last in the hand.
    HighestIndex,
}

/// Tries every card at every available cell and picks the best-rated move.
///
/// Ties are broken by position, preferring the uppermost row and then the
/// leftmost column, and finally by the position of the card in the hand.
#[derive(Clone, Debug)]
pub struct ScoredStrategy<E> {
    evaluator: E,
    tie_break: HandTieBreak,
}

impl<E: MoveEvaluator> ScoredStrategy<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            tie_break: HandTieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: HandTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// `Greater` means that `a` is the better move.
    fn compare(&self, a: &Move, b: &Move) -> Ordering {
        let by_hand_idx = match self.tie_break {
            HandTieBreak::LowestIndex => b.hand_idx.cmp(&a.hand_idx),
            HandTieBreak::HighestIndex => a.hand_idx.cmp(&b.hand_idx),
        };
        a.score
            .cmp(&b.score)
            .then_with(|| b.position.cmp(&a.position))
            .then(by_hand_idx)
    }
}

impl<E: MoveEvaluator> Strategy for ScoredStrategy<E> {
    fn choose_move(&mut self, view: &dyn GameView, player: PlayerColor) -> Option<Move> {
        if view.phase() == GamePhase::GameOver {
            return None;
        }
        let best = possible_placements(view, player)
            .into_iter()
            .map(|placement| {
                let score =
                    self.evaluator
                        .evaluate(view, player, placement.card, placement.position);
                placement.scored(score)
            })
            .max_by(|a, b| self.compare(a, b));
        debug!(%player, ?best, "Chose move");
        best
    }
}
