use tracing::debug;
use trios::{GamePhase, GameView, PlayerColor};
use trios_bot_utils::{possible_placements, Move, Strategy};

/// Plays the move that flips the most cards, including all combos.
///
/// Among moves with the same number of flips, a stronger card (by the sum of
/// its values) replaces the current choice. Otherwise the first move found
/// wins, going over the hand first and the cells second.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaxFlipsStrategy;

impl Strategy for MaxFlipsStrategy {
    fn choose_move(&mut self, view: &dyn GameView, player: PlayerColor) -> Option<Move> {
        if view.phase() == GamePhase::GameOver {
            return None;
        }
        let mut best: Option<(Move, u16)> = None;
        for placement in possible_placements(view, player) {
            let owned = placement.card.clone().with_owner(player);
            let flips = match view.potential_flips(&owned, placement.position) {
                Ok(flips) => flips,
                Err(err) => {
                    debug!(%err, "Skipping placement");
                    continue;
                }
            };
            let strength = placement.card.total_value();
            let candidate = placement.scored(flips as i64);
            let is_better = match best {
                None => true,
                Some((current, current_strength)) => {
                    candidate.score > current.score
                        || (candidate.score == current.score && strength > current_strength)
                }
            };
            if is_better {
                debug!("New best move {:?}", candidate);
                best = Some((candidate, strength));
            }
        }
        best.map(|(mv, _)| mv)
    }
}
