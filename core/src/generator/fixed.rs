use super::*;

/// Places a known layout as given, the first click is not protected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMineGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMineGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl MineGenerator for FixedMineGenerator<'_> {
    fn generate(&self, board: &mut Board, mines: CellCount, _first_click: Coord2) -> Result<()> {
        board.place_mines_at(self.mines)?;
        if board.mine_count() != mines {
            log::warn!(
                "Fixed layout mine count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                mines
            );
        }
        board.compute_adjacency();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_layout_verbatim() {
        let mut board = Board::new(3, 3).unwrap();

        FixedMineGenerator::new(&[(1, 1)])
            .generate(&mut board, 1, (1, 1))
            .unwrap();

        assert!(board[(1, 1)].mine);
        assert_eq!(board[(0, 0)].adjacent_count, 1);
        assert_eq!(board.mine_count(), 1);
    }
}
