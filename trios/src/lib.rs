//! The rules of Three Trios: a grid with holes, two players with a hand of
//! cards each, and battles that flip the cards of the opponent.

pub use battle::*;
pub use board::*;
pub use cards::*;
pub use coordinate::*;
pub use errors::*;
pub use game::*;
pub use grid::*;
pub use player_state::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod battle;
mod board;
mod cards;
mod coordinate;
mod errors;
mod game;
mod grid;
mod player_state;
mod visualization;
