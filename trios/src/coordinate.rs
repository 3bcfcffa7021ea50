use serde::{Deserialize, Serialize};

/// A position on the grid, as a 0-based row and column.
///
/// Coordinates are ordered row-major, i.e. first by row, then by column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

/// One of the four sides of a card, and the direction of an attack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring coordinate in the given direction.
    ///
    /// Returns `None` when stepping off the top or left edge. Stepping off the
    /// bottom or right edge can only be detected by the grid.
    pub fn step(self, direction: Direction) -> Option<Coordinate> {
        let Coordinate { row, col } = self;
        match direction {
            Direction::North => row.checked_sub(1).map(|row| Coordinate { row, col }),
            Direction::South => row.checked_add(1).map(|row| Coordinate { row, col }),
            Direction::East => col.checked_add(1).map(|col| Coordinate { row, col }),
            Direction::West => col.checked_sub(1).map(|col| Coordinate { row, col }),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl Direction {
    /// All directions, in the order in which battles are resolved.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// The direction in which `to` lies as seen from `from`.
    ///
    /// Only orthogonally adjacent coordinates have a direction.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| from.step(dir) == Some(to))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn opposite_is_involutive(dir: Direction) -> bool {
            dir.opposite().opposite() == dir && dir.opposite() != dir
        }

        fn between_inverts_step(row: u8, col: u8, dir: Direction) -> bool {
            let from = Coordinate::new(row as usize, col as usize);
            match from.step(dir) {
                Some(to) => Direction::between(from, to) == Some(dir)
                    && Direction::between(to, from) == Some(dir.opposite()),
                None => true,
            }
        }
    }

    #[test]
    fn step_stops_at_top_left_edge() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.step(Direction::North), None);
        assert_eq!(origin.step(Direction::West), None);
        assert_eq!(origin.step(Direction::South), Some(Coordinate::new(1, 0)));
        assert_eq!(origin.step(Direction::East), Some(Coordinate::new(0, 1)));
    }

    #[test]
    fn non_adjacent_coordinates_have_no_direction() {
        let a = Coordinate::new(1, 1);
        assert_eq!(Direction::between(a, a), None);
        assert_eq!(Direction::between(a, Coordinate::new(2, 2)), None);
        assert_eq!(Direction::between(a, Coordinate::new(1, 3)), None);
    }
}
