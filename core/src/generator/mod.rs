use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Lays the mines of a fresh board once the first clicked cell is known.
pub trait MineGenerator {
    fn generate(&self, board: &mut Board, mines: CellCount, first_click: Coord2) -> Result<()>;
}

/// Serializable choice of generator kept by a session until the first reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinePlacement {
    Random { seed: u64 },
    Fixed(Vec<Coord2>),
}

impl MineGenerator for MinePlacement {
    fn generate(&self, board: &mut Board, mines: CellCount, first_click: Coord2) -> Result<()> {
        match self {
            Self::Random { seed } => {
                RandomMineGenerator::new(*seed).generate(board, mines, first_click)
            }
            Self::Fixed(coords) => {
                FixedMineGenerator::new(coords).generate(board, mines, first_click)
            }
        }
    }
}
