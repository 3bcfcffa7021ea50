use crate::{CardId, CellState, Coordinate, GamePhase, PlayerColor};

/// The broad category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is malformed, regardless of the state of the game.
    InvalidArgument,
    /// The coordinate lies outside of the grid.
    InvalidPosition,
    /// The input is fine in general, but not in the current state.
    IllegalState,
}

/// The error type for operations on a [`Grid`](crate::Grid) or [`Board`](crate::Board).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    OutOfBounds(Coordinate),
    Hole(Coordinate),
    Occupied(Coordinate),
    NoCard(Coordinate),
    UnownedCard,
    SameOwner { pos: Coordinate, owner: PlayerColor },
    NotAdjacent { from: Coordinate, to: Coordinate },
    IllegalCellTransition {
        pos: Coordinate,
        from: CellState,
        to: CellState,
    },
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::OutOfBounds(_) => ErrorKind::InvalidPosition,
            BoardError::UnownedCard | BoardError::NotAdjacent { .. } => ErrorKind::InvalidArgument,
            BoardError::Hole(_)
            | BoardError::Occupied(_)
            | BoardError::NoCard(_)
            | BoardError::SameOwner { .. }
            | BoardError::IllegalCellTransition { .. } => ErrorKind::IllegalState,
        }
    }
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::OutOfBounds(pos) => write!(f, "Position {} is outside of the grid", pos),
            BoardError::Hole(pos) => write!(f, "Position {} is a hole", pos),
            BoardError::Occupied(pos) => write!(f, "Position {} is already occupied", pos),
            BoardError::NoCard(pos) => write!(f, "There is no card at position {}", pos),
            BoardError::UnownedCard => write!(f, "Only cards with an owner can be placed"),
            BoardError::SameOwner { pos, owner } => write!(
                f,
                "The card at position {} already belongs to {}",
                pos, owner
            ),
            BoardError::NotAdjacent { from, to } => {
                write!(f, "Positions {} and {} are not adjacent", from, to)
            }
            BoardError::IllegalCellTransition { pos, from, to } => write!(
                f,
                "The cell at position {} cannot change from {:?} to {:?}",
                pos, from, to
            ),
        }
    }
}

/// The error type for setting up a grid or a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    ZeroDimension { rows: usize, cols: usize },
    EvenDimension { rows: usize, cols: usize },
    OddNumberOfCards(usize),
    UnevenHands { red: usize, blue: usize },
    TooManyCards(usize),
}

impl SetupError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

impl std::error::Error for SetupError {}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::ZeroDimension { rows, cols } => write!(
                f,
                "Grid dimensions must be positive, but got {}x{}",
                rows, cols
            ),
            SetupError::EvenDimension { rows, cols } => {
                write!(f, "Grid dimensions must be odd, but got {}x{}", rows, cols)
            }
            SetupError::OddNumberOfCards(n) => {
                write!(f, "The number of cards must be even, but got {}", n)
            }
            SetupError::UnevenHands { red, blue } => write!(
                f,
                "Both hands must have the same size, but red has {} and blue has {} cards",
                red, blue
            ),
            SetupError::TooManyCards(n) => write!(f, "{} cards are too many to deal", n),
        }
    }
}

/// The error type for the game's state machine, e.g. for playing a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    AlreadyStarted(GamePhase),
    NoCardsDealt,
    NotStarted,
    GameOver,
    CardNotInHand {
        card: CardId,
        player: PlayerColor,
    },
    HandIndexOutOfRange {
        hand_idx: usize,
        player: PlayerColor,
    },
    CannotPlace {
        pos: Coordinate,
        err: BoardError,
    },
    /// The board rejected an operation that the game had already validated.
    Board(BoardError),
}

impl IllegalMove {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IllegalMove::Board(err) => err.kind(),
            _ => ErrorKind::IllegalState,
        }
    }
}

impl From<BoardError> for IllegalMove {
    fn from(err: BoardError) -> Self {
        IllegalMove::Board(err)
    }
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::CannotPlace { err, .. } | IllegalMove::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::AlreadyStarted(phase) => write!(
                f,
                "The game can only be started during initialization, but it is in phase {:?}",
                phase
            ),
            IllegalMove::NoCardsDealt => write!(f, "No cards have been dealt yet"),
            IllegalMove::NotStarted => write!(f, "The game has not started yet"),
            IllegalMove::GameOver => write!(f, "The game is over"),
            IllegalMove::CardNotInHand { card, player } => write!(
                f,
                "Tried to play card #{}, which is not in the hand of {}",
                card.0, player
            ),
            IllegalMove::HandIndexOutOfRange { hand_idx, player } => write!(
                f,
                "Tried to play the card at index {}, but the hand of {} is smaller",
                hand_idx, player
            ),
            IllegalMove::CannotPlace { pos, .. } => {
                write!(f, "Cannot place a card at position {}", pos)
            }
            IllegalMove::Board(_) => write!(f, "The board rejected the move"),
        }
    }
}

/// The error type for [`Grid::with_holes()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridSetupError {
    Dimensions(SetupError),
    Hole(BoardError),
}

impl From<SetupError> for GridSetupError {
    fn from(err: SetupError) -> Self {
        GridSetupError::Dimensions(err)
    }
}

impl From<BoardError> for GridSetupError {
    fn from(err: BoardError) -> Self {
        GridSetupError::Hole(err)
    }
}

impl std::error::Error for GridSetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridSetupError::Dimensions(err) => Some(err),
            GridSetupError::Hole(err) => Some(err),
        }
    }
}

impl std::fmt::Display for GridSetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridSetupError::Dimensions(_) => write!(f, "Invalid grid dimensions"),
            GridSetupError::Hole(_) => write!(f, "Invalid hole"),
        }
    }
}
