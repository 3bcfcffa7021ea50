use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    deal, deal_hands, BattleEngine, Board, BoardError, Card, CardId, Coordinate, Grid,
    IllegalMove, PlayerColor, PlayerState, SetupError,
};

/// The phases of a game.
///
/// `BattlePhase` and `ComboPhase` only last while [`Game::play_card()`] is
/// running, so outside observers see the other three.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Initialization,
    WaitingForMove,
    BattlePhase,
    ComboPhase,
    GameOver,
}

/// The result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner(PlayerColor),
    Draw,
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game goes on with `next_player`.
    Continue {
        waves: Vec<Vec<Coordinate>>,
        next_player: PlayerColor,
    },
    /// The turn filled the board.
    GameOver {
        waves: Vec<Vec<Coordinate>>,
        outcome: Outcome,
    },
}

impl TurnOutcome {
    /// The cards flipped by the battle and by each combo step. The last wave
    /// is never empty.
    pub fn waves(&self) -> &[Vec<Coordinate>] {
        match self {
            TurnOutcome::Continue { waves, .. } | TurnOutcome::GameOver { waves, .. } => waves,
        }
    }

    pub fn total_flips(&self) -> usize {
        self.waves().iter().map(Vec::len).sum()
    }
}

/// Read-only access to a game, e.g. for a strategy choosing a move.
pub trait GameView {
    fn board(&self) -> &Board;

    fn hand(&self, player: PlayerColor) -> &[Card];

    fn phase(&self) -> GamePhase;

    fn current_player(&self) -> PlayerColor;

    fn score(&self, player: PlayerColor) -> usize;

    fn winner(&self) -> Option<Outcome>;

    /// How many cards would be flipped in total if `card` were placed at
    /// `pos`? Never changes the game.
    fn potential_flips(&self, card: &Card, pos: Coordinate) -> Result<usize, BoardError>;
}

/// A game of two players on one board.
///
/// A game is set up with [`Self::initialize_game()`] or
/// [`Self::initialize_with_hands()`] and started with [`Self::start_game()`].
/// Afterwards, the players take turns with [`Self::play_card()`] until the
/// board is full.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: [PlayerState; 2],
    current_player: PlayerColor,
    phase: GamePhase,
    dealt: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(Grid::default()),
            players: Default::default(),
            current_player: PlayerColor::Red,
            phase: GamePhase::Initialization,
            dealt: false,
        }
    }

    /// Shuffles the cards and deals half of them to each player.
    ///
    /// This can also be used to restart a game.
    pub fn initialize_game<R: Rng + ?Sized>(
        &mut self,
        grid: Grid,
        cards: Vec<Card>,
        rng: &mut R,
    ) -> Result<(), SetupError> {
        let players = deal(cards, rng)?;
        self.reset(grid, players);
        Ok(())
    }

    /// Like [`Self::initialize_game()`], but with fixed hands.
    pub fn initialize_with_hands(
        &mut self,
        grid: Grid,
        red: Vec<Card>,
        blue: Vec<Card>,
    ) -> Result<(), SetupError> {
        let players = deal_hands(red, blue)?;
        self.reset(grid, players);
        Ok(())
    }

    fn reset(&mut self, grid: Grid, players: [PlayerState; 2]) {
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            hand_size = players[0].hand().len(),
            "Dealt cards"
        );
        self.board = Board::new(grid);
        self.players = players;
        self.current_player = PlayerColor::Red;
        self.phase = GamePhase::Initialization;
        self.dealt = true;
    }

    /// Red moves first.
    ///
    /// A grid made only of holes is full from the start, so that game is over
    /// at once.
    pub fn start_game(&mut self) -> Result<(), IllegalMove> {
        if self.phase != GamePhase::Initialization {
            return Err(IllegalMove::AlreadyStarted(self.phase));
        }
        if !self.dealt {
            return Err(IllegalMove::NoCardsDealt);
        }
        self.current_player = PlayerColor::Red;
        if self.board.is_full() {
            self.phase = GamePhase::GameOver;
            debug!(outcome = ?self.outcome(), "Game over before the first move");
        } else {
            self.phase = GamePhase::WaitingForMove;
        }
        Ok(())
    }

    /// The current player places the card with this id at `pos`.
    ///
    /// Nothing changes if the move is rejected.
    pub fn play_card(&mut self, card: CardId, pos: Coordinate) -> Result<TurnOutcome, IllegalMove> {
        self.check_waiting_for_move()?;
        let player = self.current_player;
        let hand_idx = self.players[player.index()]
            .position_of(card)
            .ok_or(IllegalMove::CardNotInHand { card, player })?;
        self.play_at(hand_idx, pos)
    }

    /// Like [`Self::play_card()`], but picks the card by its index in the
    /// current player's hand.
    pub fn play_card_at_index(
        &mut self,
        hand_idx: usize,
        pos: Coordinate,
    ) -> Result<TurnOutcome, IllegalMove> {
        self.check_waiting_for_move()?;
        let player = self.current_player;
        if hand_idx >= self.players[player.index()].hand().len() {
            return Err(IllegalMove::HandIndexOutOfRange { hand_idx, player });
        }
        self.play_at(hand_idx, pos)
    }

    fn check_waiting_for_move(&self) -> Result<(), IllegalMove> {
        match self.phase {
            GamePhase::Initialization => Err(IllegalMove::NotStarted),
            GamePhase::GameOver => Err(IllegalMove::GameOver),
            GamePhase::WaitingForMove | GamePhase::BattlePhase | GamePhase::ComboPhase => Ok(()),
        }
    }

    fn play_at(&mut self, hand_idx: usize, pos: Coordinate) -> Result<TurnOutcome, IllegalMove> {
        self.board
            .check_placeable(pos)
            .map_err(|err| IllegalMove::CannotPlace { pos, err })?;

        let player = self.current_player;
        let hand = &mut self.players[player.index()];
        self.board.place(hand.hand()[hand_idx].clone(), pos)?;
        let card = hand.take(hand_idx);
        trace!(%player, %card, %pos, "Placed card");

        self.phase = GamePhase::BattlePhase;
        let mut engine = BattleEngine::new(&mut self.board);
        let first_wave = engine.run_battle(pos)?;
        if !first_wave.is_empty() {
            self.phase = GamePhase::ComboPhase;
        }
        let waves = run_combos(&mut engine, first_wave)?;
        debug!(
            %player,
            %card,
            %pos,
            flips = waves.iter().map(Vec::len).sum::<usize>(),
            combo_steps = waves.len().saturating_sub(1),
            "Resolved turn"
        );

        if self.board.is_full() {
            self.phase = GamePhase::GameOver;
            let outcome = self.outcome();
            debug!(
                ?outcome,
                red = self.score(PlayerColor::Red),
                blue = self.score(PlayerColor::Blue),
                "Game over"
            );
            Ok(TurnOutcome::GameOver { waves, outcome })
        } else {
            self.current_player = player.opponent();
            self.phase = GamePhase::WaitingForMove;
            Ok(TurnOutcome::Continue {
                waves,
                next_player: self.current_player,
            })
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self, player: PlayerColor) -> &[Card] {
        self.players[player.index()].hand()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerColor {
        self.current_player
    }

    /// The cards this player owns on the board plus the cards in their hand.
    pub fn score(&self, player: PlayerColor) -> usize {
        self.board.card_count(player) + self.hand(player).len()
    }

    /// `None` until the game is over.
    pub fn winner(&self) -> Option<Outcome> {
        (self.phase == GamePhase::GameOver).then(|| self.outcome())
    }

    fn outcome(&self) -> Outcome {
        let red = self.score(PlayerColor::Red);
        let blue = self.score(PlayerColor::Blue);
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerColor::Red),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerColor::Blue),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Plays out the battle and all combos on a copy of the board.
    ///
    /// Positions where the card can't be placed yield 0. The card must have an
    /// owner, since the owner decides which cards are attacked.
    pub fn potential_flips(&self, card: &Card, pos: Coordinate) -> Result<usize, BoardError> {
        if card.owner().is_none() {
            return Err(BoardError::UnownedCard);
        }
        if !self.board.can_place(pos) {
            return Ok(0);
        }
        let mut board = self.board.clone();
        board.place(card.clone(), pos)?;
        let mut engine = BattleEngine::new(&mut board);
        let first_wave = engine.run_battle(pos)?;
        let waves = run_combos(&mut engine, first_wave)?;
        Ok(waves.iter().map(Vec::len).sum())
    }
}

// Runs combo steps until one flips nothing. Returns all non-empty waves,
// starting with `first_wave`.
fn run_combos(
    engine: &mut BattleEngine<'_>,
    first_wave: Vec<Coordinate>,
) -> Result<Vec<Vec<Coordinate>>, BoardError> {
    let mut waves = Vec::new();
    let mut wave = first_wave;
    while !wave.is_empty() {
        let next = engine.run_combo_step(&wave)?;
        waves.push(wave);
        wave = next;
    }
    Ok(waves)
}

impl GameView for Game {
    fn board(&self) -> &Board {
        Game::board(self)
    }

    fn hand(&self, player: PlayerColor) -> &[Card] {
        Game::hand(self, player)
    }

    fn phase(&self) -> GamePhase {
        Game::phase(self)
    }

    fn current_player(&self) -> PlayerColor {
        Game::current_player(self)
    }

    fn score(&self, player: PlayerColor) -> usize {
        Game::score(self, player)
    }

    fn winner(&self) -> Option<Outcome> {
        Game::winner(self)
    }

    fn potential_flips(&self, card: &Card, pos: Coordinate) -> Result<usize, BoardError> {
        Game::potential_flips(self, card, pos)
    }
}
