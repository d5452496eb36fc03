use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    pub const fn settings(self) -> Settings {
        match self {
            Self::Beginner => Settings::new_unchecked((9, 9), 10, self),
            Self::Intermediate => Settings::new_unchecked((16, 16), 40, self),
            Self::Expert => Settings::new_unchecked((30, 16), 99, self),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name() == s)
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}

/// Board dimensions and mine quota for one game. Deserialized values go through
/// [`Settings::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct Settings {
    size: Coord2,
    mines: CellCount,
    difficulty: Difficulty,
}

#[derive(Deserialize)]
struct RawSettings {
    size: Coord2,
    mines: CellCount,
    difficulty: Difficulty,
}

impl TryFrom<RawSettings> for Settings {
    type Error = GameError;

    fn try_from(raw: RawSettings) -> Result<Self> {
        Settings::new(raw.size, raw.mines, raw.difficulty)
    }
}

impl Settings {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount, difficulty: Difficulty) -> Self {
        Self {
            size,
            mines,
            difficulty,
        }
    }

    /// Requires non-zero dimensions and at least one cell free of mines.
    pub fn new((width, height): Coord2, mines: CellCount, difficulty: Difficulty) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(width, height) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked((width, height), mines, difficulty))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn number_of_mines(&self) -> CellCount {
        self.mines
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Difficulty::default().settings()
    }
}

impl From<Difficulty> for Settings {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.settings()
    }
}
