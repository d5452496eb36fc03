use alloc::string::String;
use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions must be non-zero")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mine layout has {found} mines, settings expect {expected}")]
    MineCountMismatch { expected: CellCount, found: usize },
    #[error("Mine at {0:?} lies in the opening's safe zone")]
    MineInSafeZone(Coord2),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
    #[error("Settings storage failed: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
