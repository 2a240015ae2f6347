//! Active falling piece

use crate::board::BOARD_WIDTH;
use crate::tetromino::{Shape, TetrominoType};
use ratatui::style::Color;

/// A falling (or next) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current orientation, kept as the rotated matrix itself
    pub shape: Shape,
    /// Board column of the matrix's left edge
    pub x: i32,
    /// Board row of the matrix's top edge (row 0 is the top of the board)
    pub y: i32,
}

impl Piece {
    /// Create a piece at the top-center spawn position
    pub fn spawn(piece_type: TetrominoType) -> Self {
        let shape = piece_type.shape();
        let x = (BOARD_WIDTH / 2) as i32 - (shape.size() / 2) as i32;
        Self {
            piece_type,
            shape,
            x,
            y: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.piece_type.color()
    }

    /// Absolute (x, y) board positions of the occupied sub-cells, shifted by (dx, dy)
    pub fn cells_offset(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .blocks()
            .map(move |(col, row)| (self.x + col + dx, self.y + row + dy))
    }

    /// Absolute (x, y) board positions of the occupied sub-cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_offset(0, 0)
    }

    /// Same piece, one clockwise rotation further
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Same piece moved by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        // floor(10 / 2) - floor(size / 2)
        assert_eq!(Piece::spawn(TetrominoType::I).x, 3);
        assert_eq!(Piece::spawn(TetrominoType::O).x, 4);
        assert_eq!(Piece::spawn(TetrominoType::T).x, 4);
        for piece_type in TetrominoType::all() {
            assert_eq!(Piece::spawn(piece_type).y, 0);
        }
    }

    #[test]
    fn test_cells_are_anchor_relative() {
        let piece = Piece::spawn(TetrominoType::O).translated(-4, 3);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(0, 3), (1, 3), (0, 4), (1, 4)]);
    }

    #[test]
    fn test_rotated_keeps_anchor() {
        let piece = Piece::spawn(TetrominoType::L).translated(1, 2);
        let rotated = piece.rotated();
        assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
        assert_ne!(rotated.shape, piece.shape);
    }
}
