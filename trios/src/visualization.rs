use crate::{Board, Card, CellState, PlayerColor};

/// Draws the board as a box with one character per cell: `R` and `B` for the
/// owners of cards, `X` for holes and `·` for available cells.
pub fn visualize_board(board: &Board) -> String {
    let grid = board.grid();
    let mut result = String::from("    ");
    for col in 0..grid.cols() {
        result += &format!("{:<2}", col % 10);
    }
    result += "\n   ╭";
    for _ in 0..grid.cols() {
        result += "──";
    }
    result += "╮";

    for pos in grid.positions() {
        if pos.col == 0 {
            result += &format!("\n{:>2} │", pos.row);
        }
        let symbol = match grid.cell_state(pos) {
            Ok(CellState::Hole) => 'X',
            Ok(CellState::Available) | Err(_) => '·',
            Ok(CellState::Occupied) => {
                let owner = board.card_at(pos).ok().flatten().and_then(Card::owner);
                match owner {
                    Some(PlayerColor::Red) => 'R',
                    Some(PlayerColor::Blue) => 'B',
                    None => '?',
                }
            }
        };
        result.push(symbol);
        result.push(' ');
        if pos.col + 1 == grid.cols() {
            result += "│";
        }
    }

    result += "\n   ╰";
    for _ in 0..grid.cols() {
        result += "──";
    }
    result += "╯";
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, Coordinate, Grid};

    #[test]
    fn draws_owners_and_holes() {
        let grid = Grid::with_holes(3, 3, [Coordinate::new(1, 1)]).unwrap();
        let mut board = Board::new(grid);
        board
            .place(card!("A 1 1 1 1").with_owner(PlayerColor::Red), Coordinate::new(0, 0))
            .unwrap();
        board
            .place(card!("B 1 1 1 1").with_owner(PlayerColor::Blue), Coordinate::new(2, 1))
            .unwrap();
        let expected = "    0 1 2 \n   ╭──────╮\n 0 │R · · │\n 1 │· X · │\n 2 │· B · │\n   ╰──────╯";
        assert_eq!(board.to_string(), expected);
    }
}
