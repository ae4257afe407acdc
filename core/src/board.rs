use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells, rows first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe: CellCount,
}

impl Board {
    /// Empty board, every cell hidden and mine free.
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }

        Ok(Self {
            cells: Array2::default((rows, cols).to_nd_index()),
            mine_count: 0,
            revealed_safe: 0,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    /// Mines currently on the board, zero until placement.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn all_safe_revealed(&self) -> bool {
        self.revealed_safe == self.safe_cell_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Cells that may hold a mine when `safe` is the first click.
    pub fn eligible_cells(&self, safe: Coord2) -> Vec<Coord2> {
        let mut eligible = Array2::from_elem(self.cells.dim(), true);
        for coords in self.cells.iter_neighborhood(safe) {
            eligible[coords.to_nd_index()] = false;
        }

        self.iter_coords()
            .filter(|&coords| eligible[coords.to_nd_index()])
            .collect()
    }

    /// Picks `mine_count` distinct cells outside the 3×3 block around `safe`.
    ///
    /// Every eligible cell is shuffled once and the first `mine_count` taken, so this always terminates and
    /// refuses up front when the request cannot fit.
    pub fn place_mines<R: Rng + ?Sized>(
        &mut self,
        mine_count: CellCount,
        safe: Coord2,
        rng: &mut R,
    ) -> Result<()> {
        let safe = self.validate_coords(safe)?;
        let mut eligible = self.eligible_cells(safe);

        let capacity = eligible.len() as CellCount;
        if mine_count > capacity {
            log::warn!(
                "Cannot place {} mines, only {} cells outside the safe zone around {:?}",
                mine_count,
                capacity,
                safe
            );
            return Err(GameError::TooManyMines {
                mines: mine_count,
                capacity,
            });
        }

        eligible.shuffle(rng);
        for &coords in &eligible[..usize::from(mine_count)] {
            self.cells[coords.to_nd_index()].mine = true;
        }
        self.mine_count = mine_count;
        log::debug!("Placed {} mines avoiding {:?}", mine_count, safe);
        Ok(())
    }

    /// Marks the given coordinates as mines, duplicates count once.
    pub fn place_mines_at(&mut self, mine_coords: &[Coord2]) -> Result<()> {
        for &coords in mine_coords {
            self.validate_coords(coords)?;
        }

        for &coords in mine_coords {
            self.cells[coords.to_nd_index()].mine = true;
        }
        self.mine_count = self.cells.iter().filter(|cell| cell.mine).count() as CellCount;
        Ok(())
    }

    /// Fills in `adjacent_count` for every safe cell from the final mine layout.
    pub fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].mine {
                    continue;
                }
                let count = self.adjacent_mine_count(coords);
                self.cells[coords.to_nd_index()].adjacent_count = count;
            }
        }
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos].mine).count() as u8
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].flagged)
            .count() as u8
    }

    /// Returns whether the cell went from hidden to revealed.
    pub(crate) fn reveal_cell(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return false;
        }
        cell.revealed = true;
        if !cell.mine {
            self.revealed_safe += 1;
        }
        true
    }

    /// Returns the new flag state.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.flagged = !cell.flagged;
        cell.flagged
    }

    pub(crate) fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn mined(size: Coord2, mines: &[Coord2]) -> Board {
        let mut board = Board::new(size.0, size.1).unwrap();
        board.place_mines_at(mines).unwrap();
        board.compute_adjacency();
        board
    }

    #[test]
    fn new_board_is_all_default() {
        let board = Board::new(3, 4).unwrap();

        assert_eq!(board.size(), (3, 4));
        assert_eq!(board.total_cells(), 12);
        assert!(board.cells.iter().all(|&cell| cell == Cell::default()));
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(Board::new(0, 4), Err(GameError::InvalidDimensions));
        assert_eq!(Board::new(4, 0), Err(GameError::InvalidDimensions));
    }

    #[test]
    fn validate_coords_rejects_out_of_range() {
        let board = Board::new(2, 3).unwrap();

        assert_eq!(board.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(
            board.validate_coords((2, 0)),
            Err(GameError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(
            board.validate_coords((0, 3)),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
    }

    #[test]
    fn place_mines_avoids_safe_zone_and_places_exact_count() {
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::new(8, 8).unwrap();

            board.place_mines(10, (3, 4), &mut rng).unwrap();

            let mines: Vec<_> = board.iter_coords().filter(|&pos| board[pos].mine).collect();
            assert_eq!(mines.len(), 10);
            assert_eq!(board.mine_count(), 10);
            for (row, col) in mines {
                assert!(row.abs_diff(3) > 1 || col.abs_diff(4) > 1);
            }
        }
    }

    #[test]
    fn place_mines_fills_every_eligible_cell() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(4, 4).unwrap();

        // corner click clips the safe zone to 4 cells
        board.place_mines(12, (0, 0), &mut rng).unwrap();

        assert_eq!(board.mine_count(), 12);
        for pos in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!(!board[pos].mine);
        }
    }

    #[test]
    fn place_mines_fails_fast_when_over_capacity() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(3, 3).unwrap();

        let result = board.place_mines(1, (1, 1), &mut rng);

        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                mines: 1,
                capacity: 0
            })
        );
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn place_mines_rejects_out_of_range_safe_cell() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(3, 3).unwrap();

        assert_eq!(
            board.place_mines(1, (3, 0), &mut rng),
            Err(GameError::OutOfBounds { row: 3, col: 0 })
        );
    }

    #[test]
    fn adjacency_matches_neighbor_mines() {
        let board = mined((4, 5), &[(0, 0), (1, 1), (3, 4), (2, 0)]);

        for coords in board.iter_coords() {
            if board[coords].mine {
                continue;
            }
            let (row, col) = coords;
            let mut expected = 0;
            for d_row in -1i16..=1 {
                for d_col in -1i16..=1 {
                    let (r, c) = (i16::from(row) + d_row, i16::from(col) + d_col);
                    if (d_row, d_col) == (0, 0) || !(0..4).contains(&r) || !(0..5).contains(&c) {
                        continue;
                    }
                    if board[(r as Coord, c as Coord)].mine {
                        expected += 1;
                    }
                }
            }
            assert_eq!(board[coords].adjacent_count, expected, "at {:?}", coords);
        }
        assert_eq!(board[(1, 0)].adjacent_count, 3);
        assert_eq!(board[(0, 4)].adjacent_count, 0);
    }

    #[test]
    fn place_mines_at_collapses_duplicates() {
        let board = mined((2, 2), &[(0, 0), (0, 0), (1, 1)]);

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 2);
    }

    #[test]
    fn place_mines_at_rejects_out_of_range() {
        let mut board = Board::new(2, 2).unwrap();

        assert_eq!(
            board.place_mines_at(&[(0, 0), (2, 1)]),
            Err(GameError::OutOfBounds { row: 2, col: 1 })
        );
        assert_eq!(board.mine_count(), 0);
        assert!(!board[(0, 0)].mine);
    }
}
