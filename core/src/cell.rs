use serde::{Deserialize, Serialize};

/// Stored state of a single board cell.
///
/// `adjacent_count` only means something once mines are placed, and never for a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub flagged: bool,
    pub mine: bool,
    pub adjacent_count: u8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }
}

/// What the player sees for a cell, handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine uncovered after the game was lost
    Mine,
    /// The mine that ended the game
    Exploded,
    /// Flag on a safe cell, only shown after the game was lost
    Misflagged,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
