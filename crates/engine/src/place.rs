use crate::command::{ensure_input_allowed, CommandError};
use crate::core::GameState;
use crate::types::BOARD_WIDTH;

/// Rotate the active piece `rotations` times clockwise, shift it so its anchor column is
/// `target_x`, then hard-drop. Any failed step restores the state from before the call.
pub fn apply_place(state: &mut GameState, target_x: i8, rotations: u8) -> Result<(), CommandError> {
    ensure_input_allowed(state)?;
    if state.active().is_none() {
        return Err(CommandError::NoActivePiece);
    }

    let snapshot = state.clone();
    let result = place_steps(state, target_x, rotations % 4);
    if result.is_err() {
        *state = snapshot;
    }
    result
}

fn place_steps(state: &mut GameState, target_x: i8, rotations: u8) -> Result<(), CommandError> {
    for _ in 0..rotations {
        if !state.try_rotate() {
            return Err(CommandError::RotationBlocked);
        }
    }

    let Some(active) = state.active() else {
        return Err(CommandError::NoActivePiece);
    };

    // Validate x bounds based on the rotated shape.
    let width = active.shape.cols() as i16;
    let target = target_x as i16;
    if target < 0 || target + width > BOARD_WIDTH as i16 {
        return Err(CommandError::XOutOfBounds);
    }

    let dx = target - active.x as i16;
    let step = dx.signum() as i8;
    for _ in 0..dx.abs() {
        if !state.try_move(step, 0) {
            return Err(CommandError::XBlocked);
        }
    }

    if !state.hard_drop() {
        return Err(CommandError::NotPlayable);
    }
    Ok(())
}
