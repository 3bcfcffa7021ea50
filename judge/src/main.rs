use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_game, GameResult, GameSetup, Player, PlayerKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trios::{Outcome, PlayerColor};

#[derive(Parser)]
struct Args {
    /// The players, at least two. With more than two, every pair plays a match.
    #[arg(num_args(2..), value_enum, required = true)]
    players: Vec<PlayerKind>,

    /// Path to the grid file
    #[arg(short, long)]
    grid: PathBuf,

    /// Path to the card file
    #[arg(short, long)]
    cards: PathBuf,

    /// How many games to play per match
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the results as JSON to stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default, Serialize)]
struct MatchScore {
    wins: [usize; 2],
    /// Games that ended because this player ran out of moves.
    stalls: [usize; 2],
    draws: usize,
}

impl MatchScore {
    /// Every game of the match, including stalled ones.
    fn num_games(&self) -> usize {
        self.wins.iter().sum::<usize>() + self.stalls.iter().sum::<usize>() + self.draws
    }

    fn percentage(&self, n: usize) -> f32 {
        n as f32 / self.num_games().max(1) as f32 * 100.0
    }
}

#[derive(Serialize)]
struct MatchReport<'a> {
    players: [&'a str; 2],
    score: &'a MatchScore,
}

fn play_matchup(
    player_1: &mut Player,
    player_2: &mut Player,
    setup: &GameSetup,
    num_games: usize,
    rng: &mut StdRng,
) -> anyhow::Result<MatchScore> {
    let player_names = [player_1.name.clone(), player_2.name.clone()];
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        // Randomly assign red, which moves first
        let player_1_is_red = rng.gen::<bool>();
        let result = if player_1_is_red {
            play_game(setup, rng, player_1.strategy.as_mut(), player_2.strategy.as_mut())?
        } else {
            play_game(setup, rng, player_2.strategy.as_mut(), player_1.strategy.as_mut())?
        };
        let player_idx =
            |color: PlayerColor| usize::from((color == PlayerColor::Red) != player_1_is_red);

        match result {
            GameResult::Finished {
                outcome: Outcome::Winner(color),
                scores,
            } => {
                let idx = player_idx(color);
                debug!(winner = player_names[idx], ?scores, game_idx);
                match_score.wins[idx] += 1;
            }
            GameResult::Finished {
                outcome: Outcome::Draw,
                ..
            } => {
                debug!(game_idx, "Draw");
                match_score.draws += 1;
            }
            GameResult::Stalled { player } => {
                let idx = player_idx(player);
                info!(player = player_names[idx], game_idx, "Player ran out of moves");
                match_score.stalls[idx] += 1;
            }
        }
    }

    eprintln!(
        "End result:\n- {} wins by {}\n- {} wins by {}\n- {} draws",
        match_score.wins[0],
        player_names[0],
        match_score.wins[1],
        player_names[1],
        match_score.draws
    );
    if match_score.stalls.iter().any(|&n| n > 0) {
        eprintln!(
            "- {} games stalled by {}, {} by {}",
            match_score.stalls[0], player_names[0], match_score.stalls[1], player_names[1]
        );
    }

    Ok(match_score)
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    players: &[Player],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    println!("\nTournament results (p1 win %, p2 win %, draw %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for j in (0..players.len()).rev() {
        print!(" {:19} |", players[j].name);
    }
    println!();
    for i in 0..players.len() {
        for _ in 0..players.len() - i + 1 {
            print!("---------------------|");
        }
        println!();
        print!(" {:19} |", players[i].name);
        for j in (0..players.len()).rev() {
            if i >= j {
                print!("    ");
            } else if let Some(score) = match_results.get(&(i, j)) {
                print!(
                    "{:5.1}% {:5.1}% {:5.1}% |",
                    score.percentage(score.wins[0]),
                    score.percentage(score.wins[1]),
                    score.percentage(score.draws)
                );
            } else {
                print!(" {:19} |", "N/A");
            }
        }
        println!();
    }
    println!("---------------------|");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let setup = GameSetup::load(&args.grid, &args.cards)?;
    info!(
        rows = setup.grid.rows(),
        cols = setup.grid.cols(),
        num_cards = setup.cards.len(),
        "Loaded game setup"
    );

    let mut players: Vec<Player> = args
        .players
        .iter()
        .enumerate()
        .map(|(idx, &kind)| Player::new(format!("{}:{}", idx + 1, kind), kind, rng.gen()))
        .collect();

    let matchups: Vec<(usize, usize)> = (0..players.len()).tuple_combinations().collect();

    let mut match_results: HashMap<(usize, usize), MatchScore> = HashMap::new();
    for (i1, i2) in matchups {
        // i1 < i2
        let (left, right) = players.split_at_mut(i2);
        let match_score = play_matchup(
            &mut left[i1],
            &mut right[0],
            &setup,
            args.num_games,
            &mut rng,
        )?;
        match_results.insert((i1, i2), match_score);
    }

    if args.json {
        let reports: Vec<MatchReport> = match_results
            .iter()
            .sorted_by_key(|(key, _)| **key)
            .map(|(&(i1, i2), score)| MatchReport {
                players: [players[i1].name.as_str(), players[i2].name.as_str()],
                score,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if players.len() > 2 {
        print_tournament_results(&players, &match_results);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalled_games_count_towards_the_percentages() {
        let score = MatchScore {
            wins: [2, 1],
            stalls: [1, 0],
            draws: 0,
        };
        assert_eq!(score.num_games(), 4);
        assert_eq!(score.percentage(score.wins[0]), 50.0);
        assert_eq!(score.percentage(score.wins[1]), 25.0);
        assert_eq!(MatchScore::default().percentage(0), 0.0);
    }
}
