use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One entry of a changeset: a cell and what it should now look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub view: CellView,
}

/// Result of a command, each coordinate appears at most once in `changes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub changes: Vec<CellChange>,
    pub outcome: Outcome,
}

impl Update {
    /// Whether this update could have changed anything on screen
    pub fn has_update(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Reveals the connected zero region around `start` and its numbered border.
///
/// Uses an explicit stack so board size does not bound recursion depth. Flagged cells are neither revealed nor
/// expanded, but cells behind them are still reached through any other open path.
pub fn flood_fill(board: &mut Board, start: Coord2) -> Result<Vec<Coord2>> {
    let start = board.validate_coords(start)?;
    let mut revealed = Vec::new();
    let mut visited = BTreeSet::new();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        if !visited.insert(coords) {
            continue;
        }

        let cell = board[coords];
        if !cell.is_hidden() {
            log::trace!("Skipping cell at {:?}", coords);
            continue;
        }

        board.reveal_cell(coords);
        revealed.push(coords);
        log::trace!(
            "Flood revealed cell at {:?}, mine count: {}",
            coords,
            cell.adjacent_count
        );

        if cell.adjacent_count == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(coords)
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    Ok(revealed)
}

/// A game from the first click to a win or a loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    placement: MinePlacement,
    board: Board,
    flag_count: CellCount,
    first_move_done: bool,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

impl Session {
    /// Random game, mines are laid on the first reveal.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Self::with_placement(config, MinePlacement::Random { seed })
    }

    /// Game over a known layout, placed as given on the first reveal.
    ///
    /// The first click is not kept clear here, only `new_game` sessions guarantee it never lands on a mine.
    pub fn with_layout(rows: Coord, cols: Coord, mines: &[Coord2]) -> Result<Self> {
        let mut probe = Board::new(rows, cols)?;
        probe.place_mines_at(mines)?;
        let config = GameConfig::new_unchecked(rows, cols, probe.mine_count());
        Self::with_placement(config, MinePlacement::Fixed(mines.to_vec()))
    }

    fn with_placement(config: GameConfig, placement: MinePlacement) -> Result<Self> {
        let board = Board::new(config.rows, config.cols)?;
        log::debug!(
            "New {}x{} game with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        Ok(Self {
            config,
            placement,
            board,
            flag_count: 0,
            first_move_done: false,
            outcome: Default::default(),
            triggered_mine: None,
        })
    }

    /// Starts over with the same configuration, random games take the new seed and fixed layouts replay.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        let placement = match &self.placement {
            MinePlacement::Random { .. } => MinePlacement::Random { seed },
            fixed @ MinePlacement::Fixed(_) => fixed.clone(),
        };
        self.board = Board::new(self.config.rows, self.config.cols)?;
        self.placement = placement;
        self.flag_count = 0;
        self.first_move_done = false;
        self.outcome = Outcome::InProgress;
        self.triggered_mine = None;
        log::debug!("Restarted {}x{} game", self.config.rows, self.config.cols);
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn first_move_done(&self) -> bool {
        self.first_move_done
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet accounted for by flags, negative when over-flagged.
    pub fn mines_remaining(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count as isize)
    }

    /// Every safe cell has been revealed.
    pub fn check_win(&self) -> bool {
        self.first_move_done && self.board.all_safe_revealed()
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.cell_view(coords))
    }

    /// Snapshot of every cell, row by row.
    pub fn views(&self) -> Vec<CellChange> {
        self.board
            .iter_coords()
            .map(|coords| self.change_at(coords))
            .collect()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Update> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(self.no_change());
        }

        let mut touched = Vec::new();
        self.reveal_single_cell(coords, &mut touched)?;
        Ok(self.finish_reveal(touched))
    }

    /// Reveals the hidden neighbors of a numbered cell once enough of its neighbors are flagged.
    pub fn chord(&mut self, coords: Coord2) -> Result<Update> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() || !self.can_chord_at(coords)? {
            return Ok(self.no_change());
        }

        let mut touched = Vec::new();
        for pos in self.board.iter_neighbors(coords) {
            if self.is_finished() {
                break;
            }
            if self.board[pos].is_hidden() {
                self.reveal_single_cell(pos, &mut touched)?;
            }
        }
        Ok(self.finish_reveal(touched))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Update> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() || self.board[coords].revealed {
            return Ok(self.no_change());
        }

        if self.board.toggle_flag(coords) {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        Ok(self.build_update(vec![coords]))
    }

    /// Primary click: chords on revealed cells, reveals hidden ones, ignores flags.
    pub fn click(&mut self, coords: Coord2) -> Result<Update> {
        let coords = self.board.validate_coords(coords)?;
        let cell = self.board[coords];
        if cell.flagged {
            Ok(self.no_change())
        } else if cell.revealed {
            self.chord(coords)
        } else {
            self.reveal(coords)
        }
    }

    /// Cells to highlight while the primary button is held on `coords`.
    pub fn pressed_cells(&self, coords: Coord2) -> Result<Vec<Coord2>> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(Vec::new());
        }

        let cell = self.board[coords];
        Ok(if cell.revealed && cell.adjacent_count > 0 {
            self.board
                .iter_neighbors(coords)
                .filter(|&pos| self.board[pos].is_hidden())
                .collect()
        } else if cell.is_hidden() {
            vec![coords]
        } else {
            Vec::new()
        })
    }

    pub fn can_chord_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.board.validate_coords(coords)?;
        let cell = self.board[coords];
        Ok(cell.revealed
            && !cell.mine
            && cell.adjacent_count > 0
            && self.board.count_flagged_neighbors(coords) == cell.adjacent_count)
    }

    fn reveal_single_cell(&mut self, coords: Coord2, touched: &mut Vec<Coord2>) -> Result<()> {
        if !self.board[coords].is_hidden() {
            return Ok(());
        }

        if !self.first_move_done {
            self.placement
                .generate(&mut self.board, self.config.mines, coords)?;
            self.first_move_done = true;
            log::debug!("First move at {:?}, mines placed", coords);
        }

        let cell = self.board[coords];
        if cell.mine {
            self.board.reveal_cell(coords);
            touched.push(coords);
            self.triggered_mine = Some(coords);
            self.outcome = Outcome::Lost;
            log::debug!("Hit mine at {:?}", coords);
            self.reveal_mines(touched);
        } else if cell.adjacent_count > 0 {
            self.board.reveal_cell(coords);
            touched.push(coords);
        } else {
            touched.extend(flood_fill(&mut self.board, coords)?);
        }
        Ok(())
    }

    /// Uncovers unflagged mines and collects wrong flags after a loss.
    fn reveal_mines(&mut self, touched: &mut Vec<Coord2>) {
        for coords in self.board.iter_coords() {
            let cell = self.board[coords];
            if cell.mine && cell.is_hidden() {
                self.board.reveal_cell(coords);
                touched.push(coords);
            } else if cell.flagged && !cell.mine {
                touched.push(coords);
            }
        }
    }

    fn finish_reveal(&mut self, touched: Vec<Coord2>) -> Update {
        if !touched.is_empty() && !self.is_finished() && self.check_win() {
            self.outcome = Outcome::Won;
            log::debug!("Game won");
        }
        self.build_update(touched)
    }

    fn build_update(&self, touched: Vec<Coord2>) -> Update {
        let mut seen = BTreeSet::new();
        let changes = touched
            .into_iter()
            .filter(|&coords| seen.insert(coords))
            .map(|coords| self.change_at(coords))
            .collect();
        Update {
            changes,
            outcome: self.outcome,
        }
    }

    fn no_change(&self) -> Update {
        Update {
            changes: Vec::new(),
            outcome: self.outcome,
        }
    }

    fn change_at(&self, coords: Coord2) -> CellChange {
        CellChange {
            coords,
            view: self.cell_view(coords),
        }
    }

    fn cell_view(&self, coords: Coord2) -> CellView {
        let cell = self.board[coords];
        if self.triggered_mine == Some(coords) {
            CellView::Exploded
        } else if cell.revealed && cell.mine {
            CellView::Mine
        } else if cell.revealed {
            CellView::Revealed(cell.adjacent_count)
        } else if cell.flagged && !cell.mine && self.outcome == Outcome::Lost {
            CellView::Misflagged
        } else if cell.flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }
}
