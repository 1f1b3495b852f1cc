use thiserror::Error;

use crate::{CellCount, Coord, MAX_SIDE, MIN_MINES, MIN_SIDE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("No difficulty selected")]
    NoDifficultySelected,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
    #[error("Width {width} is out of range, must be between {} and {}", MIN_SIDE, MAX_SIDE)]
    WidthOutOfRange { width: Coord },
    #[error("Height {height} is out of range, must be between {} and {}", MIN_SIDE, MAX_SIDE)]
    HeightOutOfRange { height: Coord },
    #[error("Need at least {} mines, got {mines}", MIN_MINES)]
    TooFewMines { mines: CellCount },
    #[error("Too many mines ({mines}) for {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Game has not been started")]
    NotStarted,
}

impl GameError {
    /// Whether this error rejects a difficulty, as opposed to a bad command.
    pub const fn is_invalid_difficulty(&self) -> bool {
        matches!(
            self,
            Self::NoDifficultySelected
                | Self::UnknownDifficulty(_)
                | Self::WidthOutOfRange { .. }
                | Self::HeightOutOfRange { .. }
                | Self::TooFewMines { .. }
                | Self::TooManyMines { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
