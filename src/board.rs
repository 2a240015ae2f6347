//! Game board representation and line clearing

use crate::piece::Piece;
use ratatui::style::Color;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Grid copy handed to readers, `[row][col]` with row 0 at the top
pub type Grid = [[Cell; BOARD_WIDTH]; BOARD_HEIGHT];

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: Grid,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return None;
        }
        Some(self.cells[y][x])
    }

    /// Set the cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return false;
        }
        self.cells[y][x] = cell;
        true
    }

    /// Whether (x, y) holds a settled block. Anything outside the grid reads as empty;
    /// walls and floor are the collision check's business.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_filled())
    }

    /// Whether `piece` moved by (dx, dy) would hit a wall, the floor, or a settled block.
    /// Sub-cells above the top edge never collide.
    pub fn check_collision(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.cells_offset(dx, dy).any(|(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i32
                || y >= BOARD_HEIGHT as i32
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Write the piece's color into every sub-cell that lands on a visible row.
    /// Sub-cells still above the top edge are dropped.
    pub fn commit(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Cell::Filled(color));
            }
        }
    }

    /// Full rows, bottom to top
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..BOARD_HEIGHT)
            .rev()
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove each listed row in the order given, shifting everything above it
    /// down one and opening an empty row at the top.
    ///
    /// Each removal works on the grid as left by the previous one, so indices
    /// are not adjusted between removals.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        for &row in rows {
            if row >= BOARD_HEIGHT {
                continue;
            }
            self.cells.copy_within(0..row, 1);
            self.cells[0] = [Cell::Empty; BOARD_WIDTH];
        }
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Copy of the whole grid
    pub fn cells(&self) -> Grid {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    fn fill_row(board: &mut Board, row: i32, color: Color) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, row, Cell::Filled(color));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Cell::Filled(Color::Red)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(Color::Red)));
        assert!(board.is_occupied(5, 5));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(0, -1, Cell::Filled(Color::Red)));
        assert!(!board.is_occupied(0, -3));
        assert!(!board.is_occupied(-1, 5));
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new();
        // O at the left wall, bottom row
        let piece = Piece::spawn(TetrominoType::O).translated(-4, 18);
        assert!(!board.check_collision(&piece, 0, 0));
        assert!(board.check_collision(&piece, -1, 0));
        assert!(board.check_collision(&piece, 0, 1));
        assert!(!board.check_collision(&piece, 1, 0));

        let right = Piece::spawn(TetrominoType::O).translated(4, 0);
        assert!(!board.check_collision(&right, 0, 0));
        assert!(board.check_collision(&right, 1, 0));
    }

    #[test]
    fn test_collision_with_settled_blocks() {
        let mut board = Board::new();
        board.set(4, 5, Cell::Filled(Color::Red));
        let piece = Piece::spawn(TetrominoType::O).translated(0, 3);
        // Occupies rows 3..=4 in columns 4..=5
        assert!(!board.check_collision(&piece, 0, 0));
        assert!(board.check_collision(&piece, 0, 1));
        assert!(!board.check_collision(&piece, 2, 1));
    }

    #[test]
    fn test_rows_above_top_never_collide() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, 0, Cell::Filled(Color::Red));
        }
        let piece = Piece::spawn(TetrominoType::O).translated(0, -2);
        assert!(!board.check_collision(&piece, 0, 0));
        assert!(board.check_collision(&piece, 0, 1));
        // Still out of the walls even when above the board
        assert!(board.check_collision(&piece, -5, 0));
    }

    #[test]
    fn test_collision_matches_rule_for_every_cell() {
        let mut board = Board::new();
        board.set(3, 7, Cell::Filled(Color::Blue));
        let probe = Piece::spawn(TetrominoType::O);
        // Probe each position with the O's top-left block
        for y in -3..=BOARD_HEIGHT as i32 + 1 {
            for x in -2..=BOARD_WIDTH as i32 + 1 {
                let piece = probe.translated(x - probe.x, y - probe.y);
                let expected = piece.cells().any(|(cx, cy)| {
                    cx < 0 || cx >= 10 || cy >= 20 || (cy >= 0 && (cx, cy) == (3, 7))
                });
                assert_eq!(board.check_collision(&piece, 0, 0), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_commit_writes_only_target_cells() {
        let mut board = Board::new();
        board.set(0, 19, Cell::Filled(Color::Red));
        let before = board.cells();

        let piece = Piece::spawn(TetrominoType::T).translated(0, 10);
        board.commit(&piece);

        let targets: Vec<_> = piece.cells().collect();
        let after = board.cells();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if targets.contains(&(x as i32, y as i32)) {
                    assert_eq!(after[y][x], Cell::Filled(TetrominoType::T.color()));
                } else {
                    assert_eq!(after[y][x], before[y][x]);
                }
            }
        }
    }

    #[test]
    fn test_commit_drops_cells_above_top() {
        let mut board = Board::new();
        // I rotated vertically: column 2 of the matrix, rows 0..4
        let piece = Piece::spawn(TetrominoType::I).rotated().translated(0, -2);
        board.commit(&piece);

        let filled: usize = board
            .cells()
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum();
        assert_eq!(filled, 2);
        assert!(board.is_occupied(5, 0));
        assert!(board.is_occupied(5, 1));
    }

    #[test]
    fn test_find_full_rows_bottom_to_top() {
        let mut board = Board::new();
        for row in 0..BOARD_HEIGHT as i32 {
            board.set(0, row, Cell::Filled(Color::Blue));
        }
        fill_row(&mut board, 5, Color::Cyan);
        fill_row(&mut board, 7, Color::Cyan);

        assert_eq!(board.find_full_rows(), vec![7, 5]);
    }

    #[test]
    fn test_clear_separated_rows() {
        let mut board = Board::new();
        for row in 0..BOARD_HEIGHT as i32 {
            board.set(0, row, Cell::Filled(Color::Blue));
        }
        fill_row(&mut board, 5, Color::Cyan);
        fill_row(&mut board, 7, Color::Cyan);
        board.set(3, 6, Cell::Filled(Color::Red));
        board.set(4, 4, Cell::Filled(Color::Green));
        board.set(6, 9, Cell::Filled(Color::Magenta));

        let rows = board.find_full_rows();
        assert_eq!(rows, vec![7, 5]);
        board.clear_rows(&rows);

        let cells = board.cells();
        assert_eq!(cells.len(), BOARD_HEIGHT);
        // Two fresh rows at the top
        assert!(cells[0].iter().all(|cell| cell.is_empty()));
        assert!(cells[1].iter().all(|cell| cell.is_empty()));
        // Row 7 went first; the second removal hit index 5 of the shifted grid
        assert_eq!(cells[7][3], Cell::Filled(Color::Red));
        assert!(cells[6].iter().all(|cell| cell.is_filled()));
        assert!(cells.iter().all(|row| row[4] != Cell::Filled(Color::Green)));
        // Rows below the clears stay put
        assert_eq!(cells[9][6], Cell::Filled(Color::Magenta));
        assert_eq!(board.find_full_rows(), vec![6]);
    }

    #[test]
    fn test_clear_rows_order_matters() {
        let mut top_first = Board::new();
        let mut bottom_first = Board::new();
        for board in [&mut top_first, &mut bottom_first] {
            fill_row(board, 5, Color::Cyan);
            fill_row(board, 7, Color::Cyan);
            board.set(3, 6, Cell::Filled(Color::Red));
        }

        top_first.clear_rows(&[5, 7]);
        bottom_first.clear_rows(&[7, 5]);

        assert!(top_first.find_full_rows().is_empty());
        assert_eq!(top_first.get(3, 7), Some(Cell::Filled(Color::Red)));
        assert_eq!(bottom_first.find_full_rows(), vec![6]);
    }

    #[test]
    fn test_clear_rows_skips_out_of_range() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Cyan);
        board.clear_rows(&[BOARD_HEIGHT, 19]);
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 18, Color::Cyan);
        fill_row(&mut board, 19, Color::Cyan);
        board.set(2, 17, Cell::Filled(Color::Red));

        board.clear_rows(&[19, 18]);

        // Old row 18 dropped onto 19 before the second removal took row 17
        assert!(board.cells()[19].iter().all(|cell| cell.is_filled()));
        assert!(board.cells()[18].iter().all(|cell| cell.is_empty()));
        assert_eq!(board.find_full_rows(), vec![19]);
        let filled: usize = board
            .cells()
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum();
        assert_eq!(filled, BOARD_WIDTH);
    }
}
