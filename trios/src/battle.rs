use crate::{Board, BoardError, Card, CellState, Coordinate, Direction};

/// Resolves battles on a board.
///
/// Placing a card starts a battle against the neighboring cards of the
/// opponent, see [`Self::run_battle()`]. Every card flipped in a battle then
/// attacks its own neighbors in a combo step, see [`Self::run_combo_step()`].
/// The cards flipped by one step are the attackers of the next, until a step
/// flips nothing:
///
/// ```
/// # use trios::{card, BattleEngine, Board, Coordinate, Grid, PlayerColor};
/// # let mut board = Board::new(Grid::new(3, 3).unwrap());
/// # let pos = Coordinate::new(1, 1);
/// # board.place(card!("Strong 9 9 9 9").with_owner(PlayerColor::Red), pos).unwrap();
/// let mut engine = BattleEngine::new(&mut board);
/// let mut wave = engine.run_battle(pos)?;
/// while !wave.is_empty() {
///     wave = engine.run_combo_step(&wave)?;
/// }
/// # Ok::<(), trios::BoardError>(())
/// ```
#[derive(Debug)]
pub struct BattleEngine<'a> {
    board: &'a mut Board,
}

impl<'a> BattleEngine<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    /// The battle started by the card that was just placed at `played_pos`.
    ///
    /// Returns the positions of the flipped cards, in the order north, south,
    /// east, west as seen from `played_pos`.
    pub fn run_battle(&mut self, played_pos: Coordinate) -> Result<Vec<Coordinate>, BoardError> {
        if self.board.grid().cell_state(played_pos)? != CellState::Occupied {
            return Err(BoardError::NoCard(played_pos));
        }
        let mut flipped = Vec::new();
        self.attack_from(played_pos, &mut flipped)?;
        Ok(flipped)
    }

    /// One wave of a combo: every card in `frontier` attacks its neighbors.
    ///
    /// Returns the positions flipped in this wave, which form the frontier of
    /// the next wave. Positions in `frontier` without a card are skipped.
    pub fn run_combo_step(
        &mut self,
        frontier: &[Coordinate],
    ) -> Result<Vec<Coordinate>, BoardError> {
        let mut flipped = Vec::new();
        for &pos in frontier {
            if self.board.grid().cell_state(pos)? != CellState::Occupied {
                continue;
            }
            self.attack_from(pos, &mut flipped)?;
        }
        Ok(flipped)
    }

    /// Would `attacker` at `attack_pos` flip `defender` at `defend_pos`?
    ///
    /// Doesn't look at the board's cards, only at its battle rule.
    pub fn should_flip(
        &self,
        attacker: &Card,
        defender: &Card,
        attack_pos: Coordinate,
        defend_pos: Coordinate,
    ) -> Result<bool, BoardError> {
        let direction =
            Direction::between(attack_pos, defend_pos).ok_or(BoardError::NotAdjacent {
                from: attack_pos,
                to: defend_pos,
            })?;
        Ok(self
            .board
            .is_card_winning_battle(attacker, defender, direction))
    }

    // The card at `pos` attacks all adjacent cards of the opponent of its owner.
    fn attack_from(
        &mut self,
        pos: Coordinate,
        flipped: &mut Vec<Coordinate>,
    ) -> Result<(), BoardError> {
        let attacker = self.board.card_at(pos)?.ok_or(BoardError::NoCard(pos))?;
        let owner = attacker.owner().ok_or(BoardError::UnownedCard)?;

        let mut defeated = Vec::with_capacity(4);
        for (direction, slot) in Direction::ALL
            .into_iter()
            .zip(self.board.adjacent_opponent_cards(pos, owner)?)
        {
            if let Some(defender) = slot {
                if self
                    .board
                    .is_card_winning_battle(attacker, defender, direction)
                {
                    defeated.push(direction);
                }
            }
        }

        for direction in defeated {
            // The neighbor exists, since there was a card on it
            if let Some(target) = self.board.grid().neighbor(pos, direction) {
                self.board.flip(target, owner)?;
                flipped.push(target);
            }
        }
        Ok(())
    }
}
