use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Direction, PlayerColor};

/// The highest directional value of a card, written as `A` in card lists.
pub const MAX_CARD_VALUE: u8 = 10;

/// Identifies a dealt card.
///
/// Two cards may have the same name and values, but every dealt card has its
/// own id: the card's index in the pool that was dealt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

/// A card with an attack value for each of its four sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    name: String,
    north: u8,
    east: u8,
    south: u8,
    west: u8,
    /// `None` until the card is dealt.
    owner: Option<PlayerColor>,
    /// `None` until the card is dealt.
    id: Option<CardId>,
}

impl Card {
    pub fn new(name: impl Into<String>, north: u8, east: u8, south: u8, west: u8) -> Self {
        Self {
            name: name.into(),
            north,
            east,
            south,
            west,
            owner: None,
            id: None,
        }
    }

    /// Returns this card owned by `owner`.
    ///
    /// Cards are normally given an owner when they are dealt. This is for
    /// previewing moves with cards that are not (yet) part of a game.
    pub fn with_owner(mut self, owner: PlayerColor) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, direction: Direction) -> u8 {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Sum of the four directional values.
    ///
    /// Orders cards the same way as the mean of their values does.
    pub fn total_value(&self) -> u16 {
        Direction::ALL
            .into_iter()
            .map(|dir| u16::from(self.value(dir)))
            .sum()
    }

    pub fn owner(&self) -> Option<PlayerColor> {
        self.owner
    }

    pub fn id(&self) -> Option<CardId> {
        self.id
    }

    pub(crate) fn set_owner(&mut self, owner: PlayerColor) {
        self.owner = Some(owner);
    }

    pub(crate) fn deal(&mut self, id: CardId, owner: PlayerColor) {
        self.id = Some(id);
        self.owner = Some(owner);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for dir in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            match self.value(dir) {
                MAX_CARD_VALUE => write!(f, " A")?,
                value => write!(f, " {}", value)?,
            }
        }
        Ok(())
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    WrongNumberOfTokens(usize),
    InvalidValue(String),
}

impl std::error::Error for CardFromStrErr {}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::WrongNumberOfTokens(n) => write!(
                f,
                "Expected a name and four values separated by spaces, but got {} tokens",
                n
            ),
            CardFromStrErr::InvalidValue(token) => write!(
                f,
                "Invalid card value '{}', expected 1-9 or A",
                token
            ),
        }
    }
}

fn parse_value(token: &str) -> Result<u8, CardFromStrErr> {
    if token == "A" {
        return Ok(MAX_CARD_VALUE);
    }
    token
        .parse::<u8>()
        .ok()
        .filter(|value| (1..=MAX_CARD_VALUE).contains(value))
        .ok_or_else(|| CardFromStrErr::InvalidValue(String::from(token)))
}

/// Parses a line of the form `<name> <north> <east> <south> <west>`.
impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [name, north, east, south, west] = tokens[..] else {
            return Err(CardFromStrErr::WrongNumberOfTokens(tokens.len()));
        };
        Ok(Card::new(
            name,
            parse_value(north)?,
            parse_value(east)?,
            parse_value(south)?,
            parse_value(west)?,
        ))
    }
}

/// Shorthand for creating cards from a card list line.
///
/// The values are given in the order north, east, south, west; 10 is `A`.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use trios::{card, Card, Direction};
/// let dragon = card!("Dragon 8 A 9 6");
/// assert_eq!(dragon.value(Direction::East), 10);
/// assert_eq!(dragon, Card::new("Dragon", 8, 10, 9, 6));
/// ```
#[macro_export]
macro_rules! card {
    ($line:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($line)
            .expect("Invalid card line given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_card_line() {
        let card: Card = "Wizard 9 5 A 1".parse().unwrap();
        assert_eq!(card.name(), "Wizard");
        assert_eq!(card.value(Direction::North), 9);
        assert_eq!(card.value(Direction::East), 5);
        assert_eq!(card.value(Direction::South), 10);
        assert_eq!(card.value(Direction::West), 1);
        assert_eq!(card.owner(), None);
        assert_eq!(card.id(), None);
        assert_eq!(card.to_string(), "Wizard 9 5 A 1");
    }

    #[test]
    fn ten_is_accepted_as_digits() {
        assert_eq!(card!("Ten 10 1 1 1").value(Direction::North), MAX_CARD_VALUE);
    }

    #[test]
    fn reject_malformed_lines() {
        assert_eq!(
            "Rogue 7 6 8".parse::<Card>(),
            Err(CardFromStrErr::WrongNumberOfTokens(4))
        );
        assert_eq!(
            "Rogue 7 6 8 0".parse::<Card>(),
            Err(CardFromStrErr::InvalidValue(String::from("0")))
        );
        assert_eq!(
            "Rogue 7 6 8 11".parse::<Card>(),
            Err(CardFromStrErr::InvalidValue(String::from("11")))
        );
        assert_eq!(
            "Rogue 7 B 8 1".parse::<Card>(),
            Err(CardFromStrErr::InvalidValue(String::from("B")))
        );
    }

    #[test]
    fn total_value_sums_all_sides() {
        assert_eq!(card!("Knight 6 8 7 5").total_value(), 26);
        assert_eq!(card!("Ace A A A A").total_value(), 40);
    }
}
