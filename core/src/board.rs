use alloc::vec::Vec;
use core::num::Saturating;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Neighbor cells of one position, at most eight, kept inline.
pub type Neighbors = SmallVec<[Cell; 8]>;

/// Row-major grid of cells, `height` rows by `width` columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    open_count: Saturating<CellCount>,
    flag_count: Saturating<CellCount>,
}

impl Board {
    /// Builds a closed, mine-free board with the dimensions of `settings`.
    pub fn new(settings: &Settings) -> Self {
        let (width, height) = settings.size();
        let cells = Array2::from_shape_fn(
            (usize::from(height), usize::from(width)),
            |(y, x)| Cell::closed((x as Coord, y as Coord)),
        );
        Self {
            cells,
            open_count: Saturating(0),
            flag_count: Saturating(0),
        }
    }

    /// `(width, height)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            Coord::try_from(cols).unwrap_or(Coord::MAX),
            Coord::try_from(rows).unwrap_or(Coord::MAX),
        )
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn neighbors_of(&self, coords: Coord2) -> Neighbors {
        self.iter_neighbors(coords).map(|pos| self[pos]).collect()
    }

    pub fn mine_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.is_mine)
    }

    pub fn flag_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.is_flagged)
    }

    fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(&Cell) -> bool) -> u8 {
        let mut count = 0;
        for pos in self.iter_neighbors(coords) {
            if predicate(&self[pos]) {
                count += 1;
            }
        }
        count
    }

    /// The opening cell together with its in-bounds neighbors.
    pub fn safe_zone(&self, opening: Coord2) -> SmallVec<[Coord2; 9]> {
        core::iter::once(opening)
            .chain(self.iter_neighbors(opening))
            .collect()
    }

    pub fn mine_total(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn open_total(&self) -> CellCount {
        self.open_count.0
    }

    pub fn flag_total(&self) -> CellCount {
        self.flag_count.0
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .map(Cell::coords)
            .collect()
    }

    /// Marks a cell as a mine, returning `false` if it already was one.
    pub(crate) fn lay_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self[coords];
        if cell.is_mine {
            false
        } else {
            cell.is_mine = true;
            true
        }
    }

    /// Opens a single cell, returning whether it was closed before.
    pub fn open(&mut self, coords: Coord2) -> bool {
        let cell = &mut self[coords];
        if cell.is_open {
            return false;
        }
        cell.is_open = true;
        self.open_count += 1;
        true
    }

    /// Flips the flag of a closed cell, returning whether anything changed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> bool {
        let cell = &mut self[coords];
        if cell.is_open {
            return false;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        true
    }

    /// Flood-fills outward from `coords`, opening every closed unflagged neighbor and
    /// continuing through safe neighbors that touch no mines. Flagged cells are never
    /// opened or crossed. Returns how many cells were opened.
    pub fn expand(&mut self, coords: Coord2) -> CellCount {
        let (width, height) = self.size();
        let mut visited: Array2<bool> =
            Array2::default((usize::from(height), usize::from(width)));
        visited[coords.to_nd_index()] = true;

        let mut to_visit = alloc::vec![coords];
        let mut opened: CellCount = 0;

        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.iter_neighbors(visit_coords) {
                let cell = self[pos];
                if visited[pos.to_nd_index()] || cell.is_flagged || cell.is_open {
                    continue;
                }

                self.open(pos);
                visited[pos.to_nd_index()] = true;
                opened += 1;

                let adjacent_mines = self.mine_count(pos);
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    pos,
                    adjacent_mines
                );

                if !cell.is_mine && adjacent_mines == 0 {
                    to_visit.push(pos);
                }
            }
        }

        opened
    }

    pub fn is_lost(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_mine && cell.is_open)
    }

    pub fn is_won(&self) -> bool {
        self.cells.iter().all(Cell::is_settled)
    }

    pub fn is_empty(&self) -> bool {
        self.open_count.0 == 0
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        let settings = Settings::new(size, 0, Difficulty::Beginner).unwrap();
        let mut board = Board::new(&settings);
        for &coords in mines {
            board.lay_mine(coords);
        }
        board
    }

    #[test]
    fn new_board_is_closed_and_row_major() {
        let board = board((4, 2), &[]);

        assert_eq!(board.size(), (4, 2));
        assert_eq!(board.rows().count(), 2);
        assert_eq!(board[(3, 1)].coords(), (3, 1));
        assert!(board.cells().all(|cell| cell.is_closed() && !cell.is_flagged));
        assert!(board.is_empty());
        assert_eq!(board.validate_coords((4, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn counts_mines_and_flags_around_a_cell() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);
        board.toggle_flag((0, 0));
        board.toggle_flag((1, 0));

        assert_eq!(board.mine_count((1, 1)), 2);
        assert_eq!(board.flag_count((1, 1)), 2);
        assert_eq!(board.mine_count((0, 2)), 0);
        assert_eq!(board.neighbors_of((1, 1)).len(), 8);
        assert_eq!(board.neighbors_of((0, 0))[0].coords(), (0, 1));
    }

    #[test]
    fn expand_opens_zero_region_and_its_border() {
        let mut board = board((4, 4), &[(3, 3)]);

        let opened = board.expand((0, 0));

        assert_eq!(opened, 14);
        assert!(board[(0, 0)].is_closed());
        assert!(board[(2, 2)].is_open);
        assert!(board[(3, 3)].is_closed());
        assert!(!board.is_lost());
    }

    #[test]
    fn expand_stops_at_flags() {
        let mut board = board((5, 1), &[]);
        board.toggle_flag((2, 0));

        board.open((0, 0));
        board.expand((0, 0));

        assert!(board[(1, 0)].is_open);
        assert!(board[(2, 0)].is_closed());
        assert!(board[(3, 0)].is_closed());
        assert!(board[(4, 0)].is_closed());
    }

    #[test]
    fn expand_is_idempotent() {
        let mut board = board((6, 6), &[(5, 0), (0, 5)]);
        board.toggle_flag((3, 3));
        board.open((2, 2));
        board.expand((2, 2));
        let snapshot = board.clone();

        assert_eq!(board.expand((2, 2)), 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn toggle_flag_ignores_open_cells() {
        let mut board = board((2, 2), &[]);
        board.open((0, 0));

        assert!(!board.toggle_flag((0, 0)));
        assert!(board.toggle_flag((1, 1)));
        assert_eq!(board.flag_total(), 1);
        assert!(board.toggle_flag((1, 1)));
        assert_eq!(board.flag_total(), 0);
        assert!(!board[(1, 1)].is_flagged);
    }

    #[test]
    fn won_requires_flags_on_mines_only() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.open((1, 0));
        board.open((0, 1));
        board.open((1, 1));
        assert!(board.is_won());

        board.toggle_flag((0, 0));
        assert!(board.is_won());

        let mut misflagged = self::board((3, 1), &[(0, 0)]);
        misflagged.open((2, 0));
        misflagged.toggle_flag((1, 0));
        assert!(!misflagged.is_won());
    }

    #[test]
    fn opening_a_mine_loses() {
        let mut board = board((2, 1), &[(1, 0)]);

        board.open((1, 0));

        assert!(board.is_lost());
        assert!(!board.is_won());
    }

    #[test]
    fn safe_zone_covers_opening_and_neighbors() {
        let board = board((9, 9), &[]);

        assert_eq!(board.safe_zone((4, 4)).len(), 9);
        assert_eq!(board.safe_zone((0, 0)).len(), 4);
        assert_eq!(board.safe_zone((0, 0))[0], (0, 0));
    }
}
