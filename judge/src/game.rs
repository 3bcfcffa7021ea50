use anyhow::{bail, Context};
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, trace};
use trios::{Game, GamePhase, Outcome, PlayerColor};
use trios_bot_utils::Strategy;

use crate::config::GameSetup;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// The board is full. Scores are given for red, then blue.
    Finished { outcome: Outcome, scores: [usize; 2] },
    /// The player had no move left although the board wasn't full.
    Stalled { player: PlayerColor },
}

/// Deals a new game from the setup and lets the strategies play it out.
///
/// Returns an error if a strategy picks an illegal move.
pub fn play_game<'a>(
    setup: &GameSetup,
    rng: &mut StdRng,
    red: &'a mut dyn Strategy,
    blue: &'a mut dyn Strategy,
) -> anyhow::Result<GameResult> {
    let mut game = Game::new();
    game.initialize_game(setup.grid.clone(), setup.cards.clone(), rng)?;
    game.start_game()?;

    while game.phase() == GamePhase::WaitingForMove {
        let player = game.current_player();
        let strategy = match player {
            PlayerColor::Red => &mut *red,
            PlayerColor::Blue => &mut *blue,
        };
        let Some(mv) = strategy.choose_move(&game, player) else {
            debug!(%player, "No move left");
            return Ok(GameResult::Stalled { player });
        };
        let outcome = game
            .play_card(mv.card, mv.position)
            .with_context(|| format!("Illegal move by {}: {:?}", player, mv))?;
        trace!(%player, flips = outcome.total_flips(), "\n{}", game.board());
    }

    let Some(outcome) = game.winner() else {
        bail!("The game stopped in phase {:?}", game.phase());
    };
    Ok(GameResult::Finished {
        outcome,
        scores: [game.score(PlayerColor::Red), game.score(PlayerColor::Blue)],
    })
}
