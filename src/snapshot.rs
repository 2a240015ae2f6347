//! Read-only copies of the game for renderers

use crate::board::{Cell, Grid};
use crate::game::GameState;
use crate::piece::Piece;

/// Everything a front end needs to draw one frame. All fields are copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Settled blocks, `[row][col]`, row 0 at the top
    pub board: Grid,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u64,
    pub state: GameState,
    /// Full rows waiting for their delayed removal (bottom to top)
    pub clearing_rows: Vec<usize>,
}

impl GameSnapshot {
    /// Board with the current piece drawn in
    pub fn composed(&self) -> Grid {
        let mut grid = self.board;
        if let Some(piece) = &self.current {
            for (x, y) in piece.cells() {
                if x >= 0 && y >= 0 {
                    if let Some(row) = grid.get_mut(y as usize) {
                        if let Some(cell) = row.get_mut(x as usize) {
                            *cell = Cell::Filled(piece.color());
                        }
                    }
                }
            }
        }
        grid
    }

    pub fn is_clearing(&self, row: usize) -> bool {
        self.clearing_rows.contains(&row)
    }
}
