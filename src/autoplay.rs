//! Greedy autoplay policy
//!
//! Tries every rotation and column for the active piece on a cloned state, resolves any
//! line clear it causes, and scores the resulting board. Lower stacks, fewer holes and
//! flatter surfaces win; cleared lines are rewarded.

use crate::core::{Board, GameState};
use crate::engine::apply_place;
use crate::types::{StageStatus, BOARD_HEIGHT, BOARD_WIDTH};

const WEIGHT_HEIGHT: f32 = -0.51;
const WEIGHT_LINES: f32 = 0.76;
const WEIGHT_HOLES: f32 = -0.36;
const WEIGHT_BUMPINESS: f32 = -0.18;
const TOP_OUT_PENALTY: f32 = -1.0e6;

/// A placement chosen by the policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rotations: u8,
    pub target_x: i8,
    pub score: f32,
}

/// Height of every column (0 for an empty column)
pub fn column_heights(board: &Board) -> [u32; BOARD_WIDTH as usize] {
    let mut heights = [0u32; BOARD_WIDTH as usize];
    for (x, h) in heights.iter_mut().enumerate() {
        if let Some(top) = (0..BOARD_HEIGHT as usize).find(|&y| board.row(y)[x] != 0) {
            *h = BOARD_HEIGHT as u32 - top as u32;
        }
    }
    heights
}

/// Empty cells with at least one filled cell above them in the same column
pub fn count_holes(board: &Board) -> u32 {
    let mut holes = 0;
    for x in 0..BOARD_WIDTH as usize {
        let mut covered = false;
        for y in 0..BOARD_HEIGHT as usize {
            let filled = board.row(y)[x] != 0;
            if filled {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }
    holes
}

/// Weighted board score after a placement that cleared `lines` rows
pub fn evaluate_board(board: &Board, lines: u32) -> f32 {
    let heights = column_heights(board);
    let aggregate: u32 = heights.iter().sum();
    let bumpiness: u32 = heights
        .windows(2)
        .map(|w| w[0].abs_diff(w[1]))
        .sum();

    WEIGHT_HEIGHT * aggregate as f32
        + WEIGHT_LINES * lines as f32
        + WEIGHT_HOLES * count_holes(board) as f32
        + WEIGHT_BUMPINESS * bumpiness as f32
}

/// Best placement for the active piece, or None if nothing can be placed
pub fn choose_placement(state: &GameState) -> Option<Placement> {
    if !state.is_playable() || state.active().is_none() {
        return None;
    }

    let mut best: Option<Placement> = None;
    for rotations in 0..4u8 {
        for target_x in 0..BOARD_WIDTH as i8 {
            let mut trial = state.clone();
            if apply_place(&mut trial, target_x, rotations).is_err() {
                continue;
            }
            let lines_before = state.lines();
            trial.finish_line_clear();

            let score = if trial.status() == StageStatus::Failed {
                TOP_OUT_PENALTY
            } else {
                evaluate_board(trial.board(), trial.lines() - lines_before)
            };

            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement {
                    rotations,
                    target_x,
                    score,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_and_holes() {
        let mut board = Board::new();
        board.set(0, 19, 1);
        board.set(1, 17, 1);
        assert_eq!(column_heights(&board)[0], 1);
        assert_eq!(column_heights(&board)[1], 3);
        assert_eq!(count_holes(&board), 2);
    }

    #[test]
    fn chooses_a_legal_placement() {
        let mut state = GameState::new(3);
        state.start_stage(1);
        let choice = choose_placement(&state);
        assert!(choice.is_some());

        let Some(p) = choice else { return };
        assert!(apply_place(&mut state, p.target_x, p.rotations).is_ok());
        assert_eq!(state.blocks_used(), 1);
    }

    #[test]
    fn prefers_filling_a_gap() {
        let mut state = GameState::new(3);
        state.start_stage(1);
        for x in 1..10 {
            state.board_mut().set(x, 19, 2);
        }
        let mut bar = crate::core::ActivePiece::spawn(crate::types::PieceKind::I);
        bar.x = 3;
        state.set_active(bar);

        let choice = choose_placement(&state);
        assert_eq!(choice.map(|p| (p.rotations % 2, p.target_x)), Some((1, 0)));
    }
}
