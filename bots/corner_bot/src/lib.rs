use trios::{Card, Coordinate, Direction, GameView, PlayerColor};
use trios_bot_utils::{MoveEvaluator, ScoredStrategy};

/// Only likes corners, and there the cards that are strongest towards the
/// inside of the grid.
///
/// Every other cell is rated 0.
#[derive(Copy, Clone, Debug, Default)]
pub struct CornerEvaluator;

impl MoveEvaluator for CornerEvaluator {
    fn evaluate(
        &self,
        view: &dyn GameView,
        _player: PlayerColor,
        card: &Card,
        pos: Coordinate,
    ) -> i64 {
        let grid = view.board().grid();
        let is_corner = (pos.row == 0 || pos.row + 1 == grid.rows())
            && (pos.col == 0 || pos.col + 1 == grid.cols());
        if !is_corner {
            return 0;
        }
        // Holes count as exposed, only the edge of the grid protects a side
        let exposed: i64 = Direction::ALL
            .into_iter()
            .filter(|&direction| grid.neighbor(pos, direction).is_some())
            .map(|direction| i64::from(card.value(direction)))
            .sum();
        exposed * 100
    }
}

pub type CornerStrategy = ScoredStrategy<CornerEvaluator>;

pub fn corner_strategy() -> CornerStrategy {
    ScoredStrategy::new(CornerEvaluator)
}
