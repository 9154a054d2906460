//! Board tests - grid, collision validator, row detection and collapse

use tetrascape::core::{canonical_shape, Board, PieceShape};
use tetrascape::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, color: u8) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, color);
    }
}

fn single_cell() -> PieceShape {
    match PieceShape::from_rows(&[&[1]]) {
        Some(s) => s,
        None => unreachable!(),
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!board.is_occupied(x, y), "Cell ({}, {}) should be empty", x, y);
            assert_eq!(board.get(x, y), Some(0));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_cells_hold_only_color_ids() {
    let mut board = Board::new();
    for color in 0..=7 {
        assert!(board.set(3, 3, color));
    }
    assert!(!board.set(3, 3, 8));
    assert!(!board.set(3, 3, 255));
    assert_eq!(board.get(3, 3), Some(7));
}

#[test]
fn test_is_occupied_bounds() {
    let mut board = Board::new();
    board.set(0, 0, 4);
    assert!(board.is_occupied(0, 0));
    assert!(!board.is_occupied(0, -1));
    assert!(!board.is_occupied(-1, 0));
    assert!(!board.is_occupied(BOARD_WIDTH as i8, 0));
    assert!(!board.is_occupied(0, BOARD_HEIGHT as i8));
}

#[test]
fn test_valid_placement_rules() {
    let mut board = Board::new();
    let t = canonical_shape(PieceKind::T);

    assert!(board.is_valid_placement(0, 0, &t));
    assert!(board.is_valid_placement(7, 18, &t));
    // Right edge, floor
    assert!(!board.is_valid_placement(8, 0, &t));
    assert!(!board.is_valid_placement(0, 19, &t));
    // Above the top edge is fine
    assert!(board.is_valid_placement(3, -2, &t));
    assert!(board.is_valid_placement(3, -5, &t));

    // Only non-zero cells collide: the empty corner of the T may overlap a block
    board.set(0, 10, 1);
    assert!(board.is_valid_placement(0, 10, &t));
    assert!(!board.is_valid_placement(0, 9, &t));
}

#[test]
fn test_settle_above_board_leaves_board_unchanged() {
    let mut board = Board::new();
    fill_row(&mut board, 19, 2);
    let before = board.clone();

    let shape = canonical_shape(PieceKind::L);
    assert_eq!(board.settle(&shape, 4, -2, 7), 0);
    assert_eq!(board, before);
    assert!(board.row(0).iter().all(|&c| c == 0));
}

#[test]
fn test_settle_partially_above_board() {
    let mut board = Board::new();
    let shape = canonical_shape(PieceKind::J);
    // Row 0 of the shape is above the board, row 1 lands on row 0.
    assert_eq!(board.settle(&shape, 2, -1, 6), 3);
    assert_eq!(board.row(0), &[0, 0, 6, 6, 6, 0, 0, 0, 0, 0]);
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_detect_full_rows() {
    let mut board = Board::new();
    assert!(board.detect_full_rows().is_empty());

    for x in 0..9 {
        board.set(x, 12, 1);
    }
    assert!(board.detect_full_rows().is_empty());

    board.set(9, 12, 3);
    assert_eq!(board.detect_full_rows().as_slice(), &[12]);

    fill_row(&mut board, 19, 5);
    let rows = board.detect_full_rows();
    assert!(rows.contains(&12));
    assert!(rows.contains(&19));
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_collapse_conserves_height() {
    let mut board = Board::new();
    for y in 10..20 {
        fill_row(&mut board, y, 1);
    }
    board.set(0, 9, 2);

    let rows: Vec<usize> = (12..20).collect();
    assert_eq!(board.collapse(&rows), 8);

    assert_eq!(board.cells().len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
    for y in 0..8 {
        assert!(board.row(y).iter().all(|&c| c == 0), "row {} should be empty", y);
    }
    assert_eq!(board.get(0, 17), Some(2));
    assert!(board.row(18).iter().all(|&c| c == 1));
    assert!(board.row(19).iter().all(|&c| c == 1));
}

#[test]
fn test_collapse_non_adjacent_rows_as_one_batch() {
    let mut board = Board::new();
    // Distinct markers per surviving row so order can be checked.
    board.set(0, 15, 1);
    fill_row(&mut board, 16, 7);
    board.set(0, 17, 2);
    fill_row(&mut board, 18, 7);
    board.set(0, 19, 3);

    assert_eq!(board.collapse(&[16, 18]), 2);
    assert_eq!(board.get(0, 17), Some(1));
    assert_eq!(board.get(0, 18), Some(2));
    assert_eq!(board.get(0, 19), Some(3));
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_collapse_ignores_order_of_indices() {
    let mut a = Board::new();
    fill_row(&mut a, 5, 1);
    fill_row(&mut a, 9, 1);
    a.set(4, 7, 6);
    let mut b = a.clone();

    a.collapse(&[5, 9]);
    b.collapse(&[9, 5]);
    assert_eq!(a, b);
    assert_eq!(a.get(4, 8), Some(6));
}

#[test]
fn test_area_clear_centre() {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        fill_row(&mut board, y, 1);
    }
    board.clear_area(5, 5);
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let inside = (4..=6).contains(&x) && (4..=6).contains(&y);
            assert_eq!(board.is_occupied(x, y), !inside, "({}, {})", x, y);
        }
    }
}

#[test]
fn test_write_grid_matches_rows() {
    let mut board = Board::new();
    board.set(1, 2, 3);
    let mut grid = [[0u8; 10]; 20];
    board.write_u8_grid(&mut grid);
    assert_eq!(grid[2][1], 3);
    assert_eq!(Board::from_rows(&grid), board);
    assert!(board.is_valid_placement(0, 0, &single_cell()));
}
