use super::*;

/// Uniformly random layout that keeps the first click and its neighbors free of mines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&self, board: &mut Board, mines: CellCount, first_click: Coord2) -> Result<()> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        board.place_mines(mines, first_click, &mut rng)?;
        board.compute_adjacency();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let mut first = Board::new(16, 30).unwrap();
        let mut second = Board::new(16, 30).unwrap();

        RandomMineGenerator::new(42).generate(&mut first, 99, (8, 15)).unwrap();
        RandomMineGenerator::new(42).generate(&mut second, 99, (8, 15)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.mine_count(), 99);
    }

    #[test]
    fn first_click_is_a_zero() {
        for seed in 0..16 {
            let mut board = Board::new(8, 8).unwrap();

            RandomMineGenerator::new(seed).generate(&mut board, 10, (0, 7)).unwrap();

            assert!(!board[(0, 7)].mine);
            assert_eq!(board[(0, 7)].adjacent_count, 0);
        }
    }
}
