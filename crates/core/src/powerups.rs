//! Power-up effects on the board
//!
//! These are the board-level halves of the power-ups. Inventory accounting, piece
//! advancement and signals live in [`GameState::use_power_up`](crate::GameState::use_power_up).

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{ActivePiece, MAX_SHAPE_DIM};

/// Board cells covered by a piece at rest
pub type Centers = ArrayVec<(i8, i8), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Cells the piece occupies on the visible board (cells above row 0 are skipped)
pub fn explosion_centers(piece: &ActivePiece) -> Centers {
    piece.cells().filter(|&(_, y)| y >= 0).collect()
}

/// Zero the 3x3 neighbourhood of every center, clipped to the board
pub fn area_clear(board: &mut Board, centers: &[(i8, i8)]) {
    for &(cx, cy) in centers {
        board.clear_area(cx, cy);
    }
}

/// Zero the column under the centre of the falling piece.
/// Returns the cleared column, or None if it lies outside the board.
pub fn column_clear(board: &mut Board, piece: &ActivePiece) -> Option<i8> {
    let x = piece.center_x();
    board.clear_column(x).then_some(x)
}
