use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;
use trios::{GamePhase, GameView, PlayerColor};
use trios_bot_utils::{possible_placements, Move, Strategy};

/// Plays a uniformly random card at a uniformly random available cell.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, view: &dyn GameView, player: PlayerColor) -> Option<Move> {
        if view.phase() == GamePhase::GameOver {
            return None;
        }
        let mv = possible_placements(view, player)
            .choose(&mut self.rng)
            .map(|placement| placement.scored(0));
        debug!(%player, ?mv, "Chose random move");
        mv
    }
}
