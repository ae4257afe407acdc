use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Board needs at least one row and one column")]
    InvalidDimensions,
    #[error("Too many mines, requested {mines} but only {capacity} cells can hold one")]
    TooManyMines { mines: CellCount, capacity: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
