use quickcheck::{Arbitrary, Gen};

use crate::{Board, Card, CellState, Coordinate, Direction, Grid, PlayerColor, MAX_CARD_VALUE};

/// A board with some cards on it, plus an owned card and a position where it
/// can be placed.
#[derive(Clone, Debug)]
pub struct BoardWithMove {
    pub board: Board,
    pub card: Card,
    pub pos: Coordinate,
}

/// A grid and an even number of cards, enough to fill the grid.
#[derive(Clone, Debug)]
pub struct GameSetup {
    pub grid: Grid,
    pub cards: Vec<Card>,
    /// For shuffling and for picking moves.
    pub seed: u64,
}

fn odd_dimension(g: &mut Gen) -> usize {
    2 * (u8::arbitrary(g) % 3) as usize + 1
}

fn arbitrary_grid(g: &mut Gen) -> Grid {
    let mut grid = Grid::new(odd_dimension(g), odd_dimension(g))
        .expect("Odd dimensions are always valid");
    let positions: Vec<Coordinate> = grid.positions().collect();
    for pos in positions {
        if u8::arbitrary(g) % 5 == 0 {
            grid.set_cell_state(pos, CellState::Hole)
                .expect("Available cells can become holes");
        }
    }
    grid
}

impl Arbitrary for BoardWithMove {
    fn arbitrary(g: &mut Gen) -> Self {
        loop {
            let mut board = Board::new(arbitrary_grid(g));
            for pos in board.empty_card_cells() {
                if bool::arbitrary(g) {
                    let card = Card::arbitrary(g).with_owner(PlayerColor::arbitrary(g));
                    board.place(card, pos).expect("The cell was empty");
                }
            }
            let empty = board.empty_card_cells();
            if let Some(&pos) = g.choose(&empty) {
                let card = Card::arbitrary(g).with_owner(PlayerColor::arbitrary(g));
                return BoardWithMove { board, card, pos };
            }
        }
    }
}

impl Arbitrary for GameSetup {
    fn arbitrary(g: &mut Gen) -> Self {
        let grid = arbitrary_grid(g);
        let num_cards = (grid.card_cell_count() / 2 + 1) * 2 + 2 * (u8::arbitrary(g) % 2) as usize;
        let cards = (0..num_cards).map(|_| Card::arbitrary(g)).collect();
        GameSetup {
            grid,
            cards,
            seed: u64::arbitrary(g),
        }
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}

impl Arbitrary for PlayerColor {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&PlayerColor::ALL).unwrap()
    }
}

impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = || u8::arbitrary(g) % MAX_CARD_VALUE + 1;
        let (north, east, south, west) = (value(), value(), value(), value());
        Card::new("Arbitrary", north, east, south, west)
    }
}
