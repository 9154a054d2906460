//! Board module - manages the settled-cell grid
//!
//! The board is a 10x20 grid where each cell is `0` (empty) or a color id `1..=7`.
//! It never holds references to pieces; it is the single source of truth for settled state.
//! Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Negative y is above the visible board: always free, never stored.

use arrayvec::ArrayVec;

use crate::pieces::PieceShape;
use crate::types::{Cell, ColorId, BOARD_HEIGHT, BOARD_WIDTH, MAX_COLOR_ID};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices found full by [`Board::detect_full_rows`]
pub type FullRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or if `cell` is not a valid color id
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if cell > MAX_COLOR_ID {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position holds a settled block.
    /// Positions outside the horizontal bounds or above the top edge are never occupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != 0)
    }

    /// Collision validator: can `shape` sit with its top-left anchor at (x, y)?
    ///
    /// Every non-zero shape cell must be within the horizontal bounds and above the floor.
    /// Cells above the top edge are always legal; cells on the board must be empty.
    pub fn is_valid_placement(&self, x: i8, y: i8, shape: &PieceShape) -> bool {
        shape.minos().all(|(dx, dy)| {
            let bx = x as i16 + dx as i16;
            let by = y as i16 + dy as i16;
            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
                return false;
            }
            by < 0 || self.cells[(by as usize) * (BOARD_WIDTH as usize) + bx as usize] == 0
        })
    }

    /// Write `color` into every shape cell that lies on the board.
    /// Cells still above row 0 are dropped. Returns the number of cells written.
    pub fn settle(&mut self, shape: &PieceShape, x: i8, y: i8, color: ColorId) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.minos() {
            let by = y + dy;
            if by < 0 {
                continue;
            }
            if self.set(x + dx, by, color) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    /// Indices of all full rows, scanned bottom to top
    pub fn detect_full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT as usize)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Empty every cell of the given rows without moving any row
    pub fn clear_rows(&mut self, rows: &[usize]) {
        for &y in rows {
            if y < BOARD_HEIGHT as usize {
                let start = y * BOARD_WIDTH as usize;
                self.cells[start..start + BOARD_WIDTH as usize].fill(0);
            }
        }
    }

    /// Remove exactly the given rows as one batch and shift the survivors down.
    ///
    /// Survivors keep their relative order; as many empty rows as were removed are
    /// prepended at the top, so the row count stays at `BOARD_HEIGHT`. Indices refer to the
    /// board before the call. Returns the number of rows removed.
    pub fn collapse(&mut self, rows: &[usize]) -> usize {
        let height = BOARD_HEIGHT as usize;
        let width = BOARD_WIDTH as usize;

        let mut removed = [false; BOARD_HEIGHT as usize];
        for &y in rows {
            if y < height {
                removed[y] = true;
            }
        }

        // Two pointers from the bottom: read every row once, write survivors downward.
        let mut write_y = height;
        for read_y in (0..height).rev() {
            if removed[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(0);
        write_y
    }

    /// Zero every in-bounds cell of the 3x3 neighbourhood around (cx, cy)
    pub fn clear_area(&mut self, cx: i8, cy: i8) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.set(cx + dx, cy + dy, 0);
            }
        }
    }

    /// Zero every cell of column `x` for the full board height.
    /// Returns false if the column is outside the board.
    pub fn clear_column(&mut self, x: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 {
            return false;
        }
        for y in 0..BOARD_HEIGHT as i8 {
            self.set(x, y, 0);
        }
        true
    }

    /// Cells of row `y` (left to right)
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Number of non-empty cells in the given rows
    pub fn filled_in_rows(&self, rows: &[usize]) -> usize {
        rows.iter()
            .filter(|&&y| y < BOARD_HEIGHT as usize)
            .map(|&y| self.row(y).iter().filter(|&&c| c != 0).count())
            .sum()
    }

    /// Number of non-empty cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a row-major grid
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Build a board from 20 rows of 10 cells
    pub fn from_rows(rows: &[[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                board.set(x as i8, y as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::canonical_shape;
    use crate::types::PieceKind;

    fn fill_row(board: &mut Board, y: i8, color: u8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, color);
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_set_rejects_invalid_color() {
        let mut board = Board::new();
        assert!(!board.set(0, 0, 8));
        assert_eq!(board.get(0, 0), Some(0));
        assert!(board.set(0, 0, 7));
    }

    #[test]
    fn test_negative_y_never_occupied() {
        let board = Board::new();
        assert!(!board.is_occupied(0, -1));
        assert!(!board.is_occupied(-1, 5));
        assert!(!board.is_occupied(10, 5));
    }

    #[test]
    fn test_placement_above_top_is_legal() {
        let board = Board::new();
        let shape = canonical_shape(PieceKind::J);
        assert!(board.is_valid_placement(0, -2, &shape));
        assert!(!board.is_valid_placement(-1, -2, &shape));
        assert!(!board.is_valid_placement(0, 19, &shape));
        assert!(board.is_valid_placement(0, 18, &shape));
    }

    #[test]
    fn test_collapse_batch_uses_pre_collapse_indices() {
        let mut board = Board::new();
        fill_row(&mut board, 19, 1);
        board.set(0, 18, 2);
        fill_row(&mut board, 17, 3);
        board.set(4, 16, 4);

        assert_eq!(board.collapse(&[19, 17]), 2);
        assert_eq!(board.get(0, 19), Some(2));
        assert_eq!(board.get(4, 18), Some(4));
        assert!(board.row(0).iter().all(|&c| c == 0));
        assert!(board.row(1).iter().all(|&c| c == 0));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_detect_full_rows_bottom_to_top() {
        let mut board = Board::new();
        fill_row(&mut board, 5, 1);
        fill_row(&mut board, 12, 1);
        assert_eq!(board.detect_full_rows().as_slice(), &[12, 5]);
    }

    #[test]
    fn test_clear_rows_keeps_positions() {
        let mut board = Board::new();
        fill_row(&mut board, 19, 6);
        board.set(3, 18, 2);
        board.clear_rows(&[19]);
        assert!(board.row(19).iter().all(|&c| c == 0));
        assert_eq!(board.get(3, 18), Some(2));
    }
}
