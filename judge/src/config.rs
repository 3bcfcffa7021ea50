use std::path::Path;

use anyhow::{bail, Context};
use trios::{Card, Coordinate, Grid};

/// Everything needed to deal a game: the grid and the card pool.
#[derive(Clone, Debug)]
pub struct GameSetup {
    pub grid: Grid,
    pub cards: Vec<Card>,
}

impl GameSetup {
    /// Checks that the pool can be dealt evenly, and that red, who moves on
    /// every odd turn, has a card for each of its turns until the grid is full.
    pub fn new(grid: Grid, cards: Vec<Card>) -> anyhow::Result<Self> {
        if cards.len() % 2 != 0 {
            bail!("The number of cards must be even, but got {}", cards.len());
        }
        let red_turns = (grid.card_cell_count() + 1) / 2;
        if cards.len() / 2 < red_turns {
            bail!(
                "The grid has {} card cells, so at least {} cards are needed, but got {}",
                grid.card_cell_count(),
                2 * red_turns,
                cards.len()
            );
        }
        Ok(Self { grid, cards })
    }

    pub fn load(grid_path: &Path, cards_path: &Path) -> anyhow::Result<Self> {
        let grid = load_grid(grid_path)?;
        let cards = load_cards(cards_path)?;
        Self::new(grid, cards)
    }
}

pub fn load_grid(path: &Path) -> anyhow::Result<Grid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read grid file {}", path.display()))?;
    parse_grid(&text).with_context(|| format!("Invalid grid file {}", path.display()))
}

pub fn load_cards(path: &Path) -> anyhow::Result<Vec<Card>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read card file {}", path.display()))?;
    parse_cards(&text).with_context(|| format!("Invalid card file {}", path.display()))
}

/// Parses a grid given as `<rows> <cols>` followed by one line per row, with
/// `C` for a card cell and `X` for a hole.
pub fn parse_grid(text: &str) -> anyhow::Result<Grid> {
    let mut lines = text.lines().enumerate();
    let Some((_, header)) = lines.next() else {
        bail!("The grid is empty");
    };
    let dims: Vec<&str> = header.split_whitespace().collect();
    let [rows, cols] = dims[..] else {
        bail!("Expected '<rows> <cols>' in line 1, got {:?}", header);
    };
    let rows: usize = rows
        .parse()
        .with_context(|| format!("Invalid number of rows {:?}", rows))?;
    let cols: usize = cols
        .parse()
        .with_context(|| format!("Invalid number of columns {:?}", cols))?;

    let mut holes = Vec::new();
    for row in 0..rows {
        let Some((line_idx, line)) = lines.next() else {
            bail!("Expected {} rows, but found only {}", rows, row);
        };
        let line = line.trim_end();
        if line.chars().count() != cols {
            bail!(
                "Expected {} cells in line {}, got {:?}",
                cols,
                line_idx + 1,
                line
            );
        }
        for (col, cell) in line.chars().enumerate() {
            match cell {
                'C' => {}
                'X' => holes.push(Coordinate::new(row, col)),
                other => bail!("Unknown cell {:?} in line {}", other, line_idx + 1),
            }
        }
    }
    if let Some((line_idx, line)) = lines.find(|(_, line)| !line.trim().is_empty()) {
        bail!("Unexpected line {} after the grid: {:?}", line_idx + 1, line);
    }

    Ok(Grid::with_holes(rows, cols, holes)?)
}

/// Parses one card per non-blank line.
pub fn parse_cards(text: &str) -> anyhow::Result<Vec<Card>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| {
            line.parse::<Card>()
                .with_context(|| format!("Invalid card in line {}", line_idx + 1))
        })
        .collect()
}
