#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Board shape and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// 8×8 with 10 mines
    pub const fn beginner() -> Self {
        Self::new_unchecked(8, 8, 10)
    }

    /// 16×16 with 40 mines
    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    /// 16×30 with 99 mines
    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Cells guaranteed to be available for mines wherever the first click lands.
    pub const fn mine_capacity(&self) -> CellCount {
        let zone_rows = if self.rows < 3 { self.rows } else { 3 };
        let zone_cols = if self.cols < 3 { self.cols } else { 3 };
        self.total_cells() - mult(zone_rows, zone_cols)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let capacity = self.mine_capacity();
        if self.mines > capacity {
            log::warn!(
                "Rejecting {}x{} board, requested {} mines but only {} fit",
                self.rows,
                self.cols,
                self.mines,
                capacity
            );
            return Err(GameError::TooManyMines {
                mines: self.mines,
                capacity,
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::expert().size(), (16, 30));
        assert_eq!(GameConfig::expert().total_cells(), 480);
    }

    #[test]
    fn capacity_leaves_room_for_largest_safe_zone() {
        assert_eq!(GameConfig::new_unchecked(8, 8, 0).mine_capacity(), 55);
        assert_eq!(GameConfig::new_unchecked(1, 1, 0).mine_capacity(), 0);
        assert_eq!(GameConfig::new_unchecked(2, 5, 0).mine_capacity(), 4);
    }

    #[test]
    fn new_rejects_bad_configs() {
        assert_eq!(
            GameConfig::new(0, 5, 0),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(
            GameConfig::new(3, 3, 1),
            Err(GameError::TooManyMines {
                mines: 1,
                capacity: 0
            })
        );
        assert!(GameConfig::new(1, 1, 0).is_ok());
        assert!(GameConfig::new(4, 4, 7).is_ok());
    }
}
