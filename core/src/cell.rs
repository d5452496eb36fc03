use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position with its mine, open and flag state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
    pub is_mine: bool,
    pub is_open: bool,
    pub is_flagged: bool,
}

impl Cell {
    pub const fn closed((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            is_mine: false,
            is_open: false,
            is_flagged: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn is_closed(&self) -> bool {
        !self.is_open
    }

    /// Whether the cell is handled correctly for a finished game: flags only on
    /// mines, mines never opened, every safe cell opened.
    pub const fn is_settled(&self) -> bool {
        if self.is_flagged {
            self.is_mine
        } else if self.is_mine {
            !self.is_open
        } else {
            self.is_open
        }
    }
}
