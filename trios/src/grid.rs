use serde::{Deserialize, Serialize};

use crate::{BoardError, Coordinate, Direction, GridSetupError, SetupError};

/// The state of a single cell of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// A card cell without a card on it.
    Available,
    /// A card cell with a card on it. Permanent.
    Occupied,
    /// Never holds a card. Permanent.
    Hole,
}

/// The layout of the playing field: which cells are holes, and which are
/// card cells.
///
/// The grid doesn't know about cards, see [`Board`](crate::Board) for that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major.
    cells: Vec<CellState>,
    /// The number of cells that are not holes.
    card_cell_count: usize,
}

/// A 3x3 grid without holes.
impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            cells: vec![CellState::Available; 9],
            card_cell_count: 9,
        }
    }
}

impl Grid {
    /// Creates a grid without holes.
    ///
    /// Both dimensions must be positive and odd.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SetupError> {
        if rows == 0 || cols == 0 {
            return Err(SetupError::ZeroDimension { rows, cols });
        }
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(SetupError::EvenDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Available; rows * cols],
            card_cell_count: rows * cols,
        })
    }

    /// Creates a grid and turns the given positions into holes.
    pub fn with_holes(
        rows: usize,
        cols: usize,
        holes: impl IntoIterator<Item = Coordinate>,
    ) -> Result<Self, GridSetupError> {
        let mut grid = Grid::new(rows, cols)?;
        for pos in holes {
            grid.set_cell_state(pos, CellState::Hole)?;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of cells that can hold a card, i.e. that are not holes.
    pub fn card_cell_count(&self) -> usize {
        self.card_cell_count
    }

    pub fn is_valid_position(&self, pos: Coordinate) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell_state(&self, pos: Coordinate) -> Result<CellState, BoardError> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Changes the state of a cell.
    ///
    /// Only `Available` and `Hole` can be set this way; a cell becomes
    /// `Occupied` by placing a card on the board. Holes and occupied cells
    /// never change, but setting a hole to `Hole` again is allowed.
    pub fn set_cell_state(&mut self, pos: Coordinate, state: CellState) -> Result<(), BoardError> {
        let idx = self.index(pos)?;
        let current = self.cells[idx];
        match (current, state) {
            (CellState::Available, CellState::Available) | (CellState::Hole, CellState::Hole) => {}
            (CellState::Available, CellState::Hole) => {
                self.cells[idx] = CellState::Hole;
                self.card_cell_count -= 1;
            }
            (from, to) => return Err(BoardError::IllegalCellTransition { pos, from, to }),
        }
        Ok(())
    }

    /// Marks an available cell as occupied. Only the board may do this.
    pub(crate) fn occupy(&mut self, pos: Coordinate) -> Result<(), BoardError> {
        let idx = self.index(pos)?;
        match self.cells[idx] {
            CellState::Available => {
                self.cells[idx] = CellState::Occupied;
                Ok(())
            }
            CellState::Occupied => Err(BoardError::Occupied(pos)),
            CellState::Hole => Err(BoardError::Hole(pos)),
        }
    }

    /// The in-bounds neighbors of a position, sharing an edge with it.
    pub fn adjacent_positions(&self, pos: Coordinate) -> Vec<Coordinate> {
        [
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ]
        .into_iter()
        .filter_map(|dir| self.neighbor(pos, dir))
        .collect()
    }

    /// The in-bounds neighbor in the given direction.
    pub fn neighbor(&self, pos: Coordinate, direction: Direction) -> Option<Coordinate> {
        pos.step(direction)
            .filter(|&neighbor| self.is_valid_position(neighbor))
    }

    /// All positions, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Coordinate> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coordinate { row, col }))
    }

    fn index(&self, pos: Coordinate) -> Result<usize, BoardError> {
        if self.is_valid_position(pos) {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(BoardError::OutOfBounds(pos))
        }
    }
}
