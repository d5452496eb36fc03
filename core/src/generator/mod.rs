use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Lays mines on a freshly created board once the opening cell is known.
pub trait MineGenerator {
    /// Places `settings.number_of_mines()` mines, returning how many were laid.
    fn place_mines(
        &mut self,
        board: &mut Board,
        settings: &Settings,
        opening: Coord2,
    ) -> Result<CellCount>;
}
