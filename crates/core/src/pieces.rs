//! Pieces module - shape matrices, clockwise rotation and wall kicks
//!
//! Shapes are small rectangular matrices (up to 4x4) whose non-zero cells mark the piece's
//! blocks. [`PieceShape`] is a plain value backed by a fixed array, so every read of a
//! canonical shape, every spawn and every rotation produces an independent copy: two pieces
//! can never share (and mutate) the same matrix.

use serde::Serialize;

use crate::types::{ColorId, PieceKind, BOARD_WIDTH};

/// Largest row or column count of any shape
pub const MAX_SHAPE_DIM: usize = 4;

/// Horizontal offsets tried, in order, when an in-place rotation collides
pub const WALL_KICKS: [i8; 4] = [1, -1, 2, -2];

/// Rectangular shape matrix of `rows` x `cols` cell markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceShape {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl PieceShape {
    /// Build a shape from matrix rows.
    /// Returns None for empty, ragged or oversized input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..width].copy_from_slice(row);
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Marker at (row, col); 0 outside the matrix
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row >= self.rows() || col >= self.cols() {
            return 0;
        }
        self.cells[row][col]
    }

    /// Offsets `(dx, dy)` of every non-zero cell, row by row
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.cells[r][c] != 0)
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Number of non-zero cells
    pub fn mino_count(&self) -> usize {
        self.minos().count()
    }

    /// 90-degree clockwise transform: an N x M matrix becomes M x N with
    /// `new[c][N-1-r] = old[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let n = self.rows();
        let m = self.cols();
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..n {
            for c in 0..m {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// The matrix as nested rows (for snapshots and display)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| self.cells[r][..self.cols()].to_vec())
            .collect()
    }
}

/// Fresh copy of the canonical spawn shape for a kind
pub fn canonical_shape(kind: PieceKind) -> PieceShape {
    let rows: &[&[u8]] = match kind {
        PieceKind::I => &[&[1, 1, 1, 1]],
        PieceKind::O => &[&[2, 2], &[2, 2]],
        PieceKind::T => &[&[0, 3, 0], &[3, 3, 3]],
        PieceKind::S => &[&[0, 4, 4], &[4, 4, 0]],
        PieceKind::Z => &[&[5, 5, 0], &[0, 5, 5]],
        PieceKind::J => &[&[6, 0, 0], &[6, 6, 6]],
        PieceKind::L => &[&[0, 0, 7], &[7, 7, 7]],
    };
    match PieceShape::from_rows(rows) {
        Some(shape) => shape,
        None => unreachable!("canonical shapes are well-formed"),
    }
}

/// Horizontal spawn column: the shape is centred on the board
pub fn spawn_x(shape: &PieceShape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8
}

/// The falling, player-controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: ColorId,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at its spawn position (centred, row 0)
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = canonical_shape(kind);
        Self {
            kind,
            x: spawn_x(&shape),
            y: 0,
            color: kind.color_id(),
            shape,
        }
    }

    /// Board coordinates of every block of the piece
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Column under the centre of the shape's width
    pub fn center_x(&self) -> i8 {
        self.x + (self.shape.cols() / 2) as i8
    }
}

/// Try to rotate a shape clockwise with horizontal wall kicks.
///
/// The rotated shape is tried at `x` first, then at `x + kick` for each of [`WALL_KICKS`]
/// in order. Returns the rotated shape and the applied offset, or None if every position
/// collides.
pub fn try_rotate(
    shape: &PieceShape,
    x: i8,
    y: i8,
    is_valid: impl Fn(i8, i8, &PieceShape) -> bool,
) -> Option<(PieceShape, i8)> {
    let rotated = shape.rotated_cw();

    std::iter::once(0)
        .chain(WALL_KICKS)
        .find(|&kick| x.checked_add(kick).is_some_and(|kx| is_valid(kx, y, &rotated)))
        .map(|kick| (rotated, kick))
}
