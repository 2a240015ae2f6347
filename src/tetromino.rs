//! Tetromino definitions and shape matrices
//!
//! Every piece is a square bitmask. Rotation works on the matrix itself,
//! so there is no rotation-state table to look up.

use ratatui::style::Color;

/// Largest matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Magenta - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// All tetromino types, in draw-table order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Spawn orientation of this tetromino
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            TetrominoType::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            TetrominoType::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            TetrominoType::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            TetrominoType::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::O => "O",
            TetrominoType::T => "T",
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
        }
    }
}

/// Square occupancy matrix of side `size` (2..=4), stored row-major in a fixed 4x4 grid.
/// Cells outside `size` are always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from 0/1 rows. The matrix must be square.
    fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        debug_assert!(size <= MAX_SHAPE_SIZE);
        debug_assert!(rows.iter().all(|row| row.len() == size));

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                cells[r][c] = bit != 0;
            }
        }
        Self { size, cells }
    }

    /// Matrix side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether sub-cell (row, col) is occupied
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    /// Occupied sub-cells as (col, row) offsets from the top-left corner
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i32, row as i32))
        })
    }

    /// Rotate 90 degrees clockwise: `new[j][n-1-i] = old[i][j]`
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for i in 0..n {
            for j in 0..n {
                cells[j][n - 1 - i] = self.cells[i][j];
            }
        }
        Shape { size: n, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_is_square_with_four_blocks() {
        for piece_type in TetrominoType::all() {
            let shape = piece_type.shape();
            assert!((2..=4).contains(&shape.size()));
            assert_eq!(shape.blocks().count(), 4, "{:?}", piece_type);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // .T.      .T.
        // TTT  ->  .TT
        // ...      .T.
        let rotated = TetrominoType::T.shape().rotated_cw();
        let expected = [
            [false, true, false],
            [false, true, true],
            [false, true, false],
        ];
        assert_eq!(rotated.size(), 3);
        for (row, cols) in expected.iter().enumerate() {
            for (col, &filled) in cols.iter().enumerate() {
                assert_eq!(rotated.is_filled(row, col), filled, "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_rotate_i_is_vertical() {
        let rotated = TetrominoType::I.shape().rotated_cw();
        let blocks: Vec<_> = rotated.blocks().collect();
        assert_eq!(blocks, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_four_rotations_restore_every_shape() {
        for piece_type in TetrominoType::all() {
            let original = piece_type.shape();
            let once = original.rotated_cw();
            let twice = once.rotated_cw();
            let back = twice.rotated_cw().rotated_cw();
            assert_eq!(back, original, "{:?}", piece_type);
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let shape = TetrominoType::O.shape();
        assert_eq!(shape.rotated_cw(), shape);
    }
}
