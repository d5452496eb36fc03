use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Rejection-sampling generator that keeps the opening cell and its neighbors free of
/// mines, so the first click always cascades.
#[derive(Clone, Debug)]
pub struct RandomMines {
    rng: SmallRng,
}

impl RandomMines {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMines {
    fn place_mines(
        &mut self,
        board: &mut Board,
        settings: &Settings,
        opening: Coord2,
    ) -> Result<CellCount> {
        let opening = board.validate_coords(opening)?;
        let (width, height) = board.size();
        let total_cells = board.total_cells();
        let mines = settings.number_of_mines();

        if mines >= total_cells {
            return Err(GameError::TooManyMines);
        }

        let mut safe_zone = board.safe_zone(opening);
        if usize::from(mines) + safe_zone.len() > usize::from(total_cells) {
            log::warn!(
                "Cannot keep {} cells around {:?} clear of {} mines, only the opening stays safe",
                safe_zone.len(),
                opening,
                mines
            );
            safe_zone.truncate(1);
        }

        let mut placed = 0;
        while placed < mines {
            let coords = (
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            if safe_zone.contains(&coords) {
                continue;
            }
            if board.lay_mine(coords) {
                placed += 1;
            }
        }

        log::debug!("Placed {} mines around opening {:?}", placed, opening);
        Ok(placed)
    }
}
