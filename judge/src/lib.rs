mod config;
mod game;
mod player;
pub use config::*;
pub use game::*;
pub use player::*;
