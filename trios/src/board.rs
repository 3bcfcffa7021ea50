use std::collections::BTreeMap;

use crate::{BoardError, Card, CellState, Coordinate, Direction, Grid, PlayerColor};

/// The cards on the grid.
///
/// Cloning a board yields a fully independent board: the clone owns its grid
/// and its cards, so flipping cards on a clone never affects the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    /// There is exactly one entry in this map for every occupied cell.
    cards: BTreeMap<Coordinate, Card>,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cards: BTreeMap::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Can a card be placed here?
    ///
    /// This is false for positions outside of the grid.
    pub fn can_place(&self, pos: Coordinate) -> bool {
        self.check_placeable(pos).is_ok()
    }

    /// Like [`Self::can_place()`], but says why a card can't be placed.
    pub fn check_placeable(&self, pos: Coordinate) -> Result<(), BoardError> {
        match self.grid.cell_state(pos)? {
            CellState::Hole => Err(BoardError::Hole(pos)),
            CellState::Occupied => Err(BoardError::Occupied(pos)),
            CellState::Available if self.cards.contains_key(&pos) => Err(BoardError::Occupied(pos)),
            CellState::Available => Ok(()),
        }
    }

    /// Places a card on an available cell, which becomes occupied for the rest
    /// of the game.
    ///
    /// The card must have an owner.
    pub fn place(&mut self, card: Card, pos: Coordinate) -> Result<(), BoardError> {
        self.check_placeable(pos)?;
        if card.owner().is_none() {
            return Err(BoardError::UnownedCard);
        }
        self.grid.occupy(pos)?;
        self.cards.insert(pos, card);
        Ok(())
    }

    /// Returns the card at this position, or `None` if the cell is available.
    pub fn card_at(&self, pos: Coordinate) -> Result<Option<&Card>, BoardError> {
        match self.grid.cell_state(pos)? {
            CellState::Hole => Err(BoardError::Hole(pos)),
            CellState::Available | CellState::Occupied => Ok(self.cards.get(&pos)),
        }
    }

    /// The cards to the north, south, east and west of the position, in that
    /// order.
    ///
    /// A slot is `None` if the neighbor is outside of the grid, a hole, or
    /// has no card.
    pub fn adjacent_cards(&self, pos: Coordinate) -> Result<[Option<&Card>; 4], BoardError> {
        if !self.grid.is_valid_position(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        Ok(Direction::ALL.map(|dir| {
            self.grid
                .neighbor(pos, dir)
                .and_then(|neighbor| self.cards.get(&neighbor))
        }))
    }

    /// Like [`Self::adjacent_cards()`], but only keeps the cards of the
    /// opponent of `player`.
    pub fn adjacent_opponent_cards(
        &self,
        pos: Coordinate,
        player: PlayerColor,
    ) -> Result<[Option<&Card>; 4], BoardError> {
        let opponent = player.opponent();
        Ok(self
            .adjacent_cards(pos)?
            .map(|slot| slot.filter(|card| card.owner() == Some(opponent))))
    }

    /// Gives the card at this position to a new owner.
    ///
    /// Flipping a card to the player who already owns it is an error.
    pub fn flip(&mut self, pos: Coordinate, new_owner: PlayerColor) -> Result<(), BoardError> {
        if self.grid.cell_state(pos)? != CellState::Occupied {
            return Err(BoardError::NoCard(pos));
        }
        let card = self.cards.get_mut(&pos).ok_or(BoardError::NoCard(pos))?;
        if card.owner() == Some(new_owner) {
            return Err(BoardError::SameOwner {
                pos,
                owner: new_owner,
            });
        }
        card.set_owner(new_owner);
        Ok(())
    }

    /// Does the attacker beat the defender when attacking in this direction?
    ///
    /// The attacker's value facing `direction` is compared to the defender's
    /// value facing back. Only a strictly greater value wins.
    pub fn is_card_winning_battle(
        &self,
        attacker: &Card,
        defender: &Card,
        direction: Direction,
    ) -> bool {
        attacker.value(direction) > defender.value(direction.opposite())
    }

    /// The number of cards on the board owned by this player.
    pub fn card_count(&self, player: PlayerColor) -> usize {
        self.cards
            .values()
            .filter(|card| card.owner() == Some(player))
            .count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cards.len()
    }

    /// Is there a card on every card cell?
    pub fn is_full(&self) -> bool {
        self.cards.len() == self.grid.card_cell_count()
    }

    /// All positions where a card can be placed, in row-major order.
    pub fn empty_card_cells(&self) -> Vec<Coordinate> {
        self.grid
            .positions()
            .filter(|&pos| self.can_place(pos))
            .collect()
    }

    /// The cards on the board, in row-major order of their positions.
    pub fn cards(&self) -> impl Iterator<Item = (Coordinate, &Card)> {
        self.cards.iter().map(|(&pos, card)| (pos, card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, ErrorKind};

    fn red(card: Card) -> Card {
        card.with_owner(PlayerColor::Red)
    }

    fn blue(card: Card) -> Card {
        card.with_owner(PlayerColor::Blue)
    }

    fn board_3x3() -> Board {
        Board::new(Grid::new(3, 3).unwrap())
    }

    #[test]
    fn place_occupies_the_cell() {
        let mut board = board_3x3();
        let pos = Coordinate::new(1, 1);
        assert!(board.can_place(pos));
        board.place(red(card!("Dragon 8 7 9 6")), pos).unwrap();
        assert!(!board.can_place(pos));
        assert_eq!(board.grid().cell_state(pos), Ok(CellState::Occupied));
        assert_eq!(board.card_at(pos).unwrap().unwrap().name(), "Dragon");
        assert_eq!(board.card_count(PlayerColor::Red), 1);
        assert_eq!(board.card_count(PlayerColor::Blue), 0);
    }

    #[test]
    fn place_rejects_holes_occupied_and_out_of_bounds() {
        let mut board = Board::new(Grid::with_holes(3, 3, [Coordinate::new(0, 0)]).unwrap());
        let err = board
            .place(red(card!("A 1 1 1 1")), Coordinate::new(0, 0))
            .unwrap_err();
        assert_eq!(err, BoardError::Hole(Coordinate::new(0, 0)));
        assert_eq!(err.kind(), ErrorKind::IllegalState);

        board
            .place(red(card!("A 1 1 1 1")), Coordinate::new(1, 1))
            .unwrap();
        let err = board
            .place(blue(card!("B 1 1 1 1")), Coordinate::new(1, 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);

        let err = board
            .place(blue(card!("B 1 1 1 1")), Coordinate::new(3, 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPosition);
        assert!(!board.can_place(Coordinate::new(3, 1)));

        let err = board
            .place(card!("C 1 1 1 1"), Coordinate::new(2, 2))
            .unwrap_err();
        assert_eq!(err, BoardError::UnownedCard);
        assert!(board.can_place(Coordinate::new(2, 2)));
    }

    #[test]
    fn card_at() {
        let board = Board::new(Grid::with_holes(3, 3, [Coordinate::new(2, 2)]).unwrap());
        assert_eq!(board.card_at(Coordinate::new(0, 0)), Ok(None));
        assert_eq!(
            board.card_at(Coordinate::new(2, 2)),
            Err(BoardError::Hole(Coordinate::new(2, 2)))
        );
        assert_eq!(
            board.card_at(Coordinate::new(0, 3)),
            Err(BoardError::OutOfBounds(Coordinate::new(0, 3)))
        );
    }

    #[test]
    fn adjacent_cards_are_ordered_north_south_east_west() {
        let mut board = board_3x3();
        board
            .place(red(card!("North 1 1 1 1")), Coordinate::new(0, 1))
            .unwrap();
        board
            .place(blue(card!("East 1 1 1 1")), Coordinate::new(1, 2))
            .unwrap();
        board
            .place(blue(card!("West 1 1 1 1")), Coordinate::new(1, 0))
            .unwrap();

        let names = board
            .adjacent_cards(Coordinate::new(1, 1))
            .unwrap()
            .map(|slot| slot.map(|card| card.name()));
        assert_eq!(names, [Some("North"), None, Some("East"), Some("West")]);

        let names = board
            .adjacent_opponent_cards(Coordinate::new(1, 1), PlayerColor::Red)
            .unwrap()
            .map(|slot| slot.map(|card| card.name()));
        assert_eq!(names, [None, None, Some("East"), Some("West")]);

        // Corner: two neighbors are outside of the grid
        let slots = board.adjacent_cards(Coordinate::new(0, 0)).unwrap();
        assert!(slots[0].is_none() && slots[3].is_none());
        assert_eq!(slots[1].map(|c| c.name()), Some("West"));
        assert_eq!(slots[2].map(|c| c.name()), Some("North"));
    }

    #[test]
    fn flip_changes_owner() {
        let mut board = board_3x3();
        let pos = Coordinate::new(0, 0);
        board.place(red(card!("Weak 1 1 1 1")), pos).unwrap();
        board.flip(pos, PlayerColor::Blue).unwrap();
        assert_eq!(
            board.card_at(pos).unwrap().unwrap().owner(),
            Some(PlayerColor::Blue)
        );
        assert_eq!(
            board.flip(pos, PlayerColor::Blue),
            Err(BoardError::SameOwner {
                pos,
                owner: PlayerColor::Blue
            })
        );
        assert_eq!(
            board.flip(Coordinate::new(1, 1), PlayerColor::Red),
            Err(BoardError::NoCard(Coordinate::new(1, 1)))
        );
        assert_eq!(
            board
                .flip(Coordinate::new(5, 5), PlayerColor::Red)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidPosition
        );
    }

    #[test]
    fn battles_need_a_strictly_greater_value() {
        let board = board_3x3();
        let attacker = card!("Attacker 1 5 1 1");
        let defender = card!("Defender 1 1 1 5");
        let weaker = card!("Weaker 1 1 1 4");
        assert!(!board.is_card_winning_battle(&attacker, &defender, Direction::East));
        assert!(board.is_card_winning_battle(&attacker, &weaker, Direction::East));
        // Attacking west uses the attacker's west value against the defender's east value
        assert!(!board.is_card_winning_battle(&attacker, &weaker, Direction::West));
    }

    #[test]
    fn fill_the_board() {
        let mut board = Board::new(Grid::with_holes(1, 3, [Coordinate::new(0, 1)]).unwrap());
        assert_eq!(
            board.empty_card_cells(),
            vec![Coordinate::new(0, 0), Coordinate::new(0, 2)]
        );
        board
            .place(red(card!("A 1 1 1 1")), Coordinate::new(0, 2))
            .unwrap();
        assert!(!board.is_full());
        board
            .place(blue(card!("B 1 1 1 1")), Coordinate::new(0, 0))
            .unwrap();
        assert!(board.is_full());
        assert!(board.empty_card_cells().is_empty());
        let positions: Vec<_> = board.cards().map(|(pos, _)| pos).collect();
        assert_eq!(positions, vec![Coordinate::new(0, 0), Coordinate::new(0, 2)]);
    }

    #[test]
    fn clones_are_independent() {
        let mut board = board_3x3();
        let pos = Coordinate::new(1, 1);
        board.place(red(card!("Weak 1 1 1 1")), pos).unwrap();

        let mut copy = board.clone();
        copy.flip(pos, PlayerColor::Blue).unwrap();
        copy.place(blue(card!("Strong 9 9 9 9")), Coordinate::new(0, 0))
            .unwrap();

        assert_eq!(
            board.card_at(pos).unwrap().unwrap().owner(),
            Some(PlayerColor::Red)
        );
        assert!(board.can_place(Coordinate::new(0, 0)));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(copy.occupied_count(), 2);
    }
}
