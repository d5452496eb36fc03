use alloc::vec::Vec;

use super::*;

/// Lays a fixed set of mines, for replays and scripted boards.
///
/// The layout must hold exactly the configured number of mines and leave the opening's
/// safe zone clear. When the layout is too dense for a full 3×3 zone, only the opening
/// itself has to be clear, the same as [`RandomMines`]. Rejected layouts leave the board
/// untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetMines {
    mines: Vec<Coord2>,
}

impl PresetMines {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MineGenerator for PresetMines {
    fn place_mines(
        &mut self,
        board: &mut Board,
        settings: &Settings,
        opening: Coord2,
    ) -> Result<CellCount> {
        board.validate_coords(opening)?;
        for &coords in &self.mines {
            board.validate_coords(coords)?;
        }

        let mut distinct = self.mines.clone();
        distinct.sort_unstable();
        distinct.dedup();

        let expected = settings.number_of_mines();
        if distinct.len() != usize::from(expected) {
            return Err(GameError::MineCountMismatch {
                expected,
                found: distinct.len(),
            });
        }
        if distinct.len() >= usize::from(board.total_cells()) {
            return Err(GameError::TooManyMines);
        }

        let mut safe_zone = board.safe_zone(opening);
        if distinct.len() + safe_zone.len() > usize::from(board.total_cells()) {
            safe_zone.truncate(1);
        }
        if let Some(&coords) = distinct.iter().find(|coords| safe_zone.contains(coords)) {
            return Err(GameError::MineInSafeZone(coords));
        }

        let mut placed = 0;
        for coords in distinct {
            if board.lay_mine(coords) {
                placed += 1;
            }
        }

        log::debug!("Placed {} preset mines around opening {:?}", placed, opening);
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(
        size: Coord2,
        mines: CellCount,
        layout: &[Coord2],
        opening: Coord2,
    ) -> (Board, Result<CellCount>) {
        let settings = Settings::new(size, mines, Difficulty::Beginner).unwrap();
        let mut board = Board::new(&settings);
        let result = PresetMines::new(layout).place_mines(&mut board, &settings, opening);
        (board, result)
    }

    #[test]
    fn lays_listed_mines_once() {
        let (board, result) = place((4, 4), 2, &[(0, 0), (3, 1), (0, 0)], (0, 3));

        assert_eq!(result, Ok(2));
        let expected: [Coord2; 2] = [(0, 0), (3, 1)];
        assert_eq!(board.mine_coords(), expected);
    }

    #[test]
    fn rejects_mines_outside_the_board() {
        let (board, result) = place((3, 3), 1, &[(3, 0)], (1, 1));

        assert_eq!(result, Err(GameError::InvalidCoords));
        assert_eq!(board.mine_total(), 0);
    }

    #[test]
    fn rejects_mine_under_the_opening() {
        let (board, result) = place((3, 3), 1, &[(1, 1)], (1, 1));

        assert_eq!(result, Err(GameError::MineInSafeZone((1, 1))));
        assert_eq!(board.mine_total(), 0);
    }

    #[test]
    fn rejects_mine_next_to_the_opening() {
        let (board, result) = place((5, 5), 2, &[(4, 4), (2, 1)], (2, 2));

        assert_eq!(result, Err(GameError::MineInSafeZone((2, 1))));
        assert_eq!(board.mine_total(), 0);
    }

    #[test]
    fn crowded_layout_only_protects_the_opening() {
        let (board, result) = place((3, 3), 2, &[(0, 0), (2, 0)], (1, 1));

        assert_eq!(result, Ok(2));
        assert!(!board[(1, 1)].is_mine);
    }

    #[test]
    fn rejects_layout_that_disagrees_with_settings() {
        let (board, result) = place((4, 4), 5, &[(3, 3)], (0, 0));

        assert_eq!(
            result,
            Err(GameError::MineCountMismatch {
                expected: 5,
                found: 1
            })
        );
        assert_eq!(board.mine_total(), 0);
    }
}
