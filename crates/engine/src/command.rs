//! Typed command surface over [`GameState`]
//!
//! The core reports rejections as `false`; this layer names the reason so shells and logs
//! get a stable error code. A rejected command never changes state, apart from the
//! power-up error signal the core emits for an empty inventory slot.

use std::fmt;

use crate::core::GameState;
use crate::types::{GameAction, PowerUpKind, StageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start(u32),
    Pause,
    Resume,
    Move { dx: i8, dy: i8 },
    Rotate,
    SoftDrop,
    HardDrop,
    UsePowerUp(PowerUpKind),
    /// The shell finished the pop animation of a pending line clear
    AnimationComplete,
    Purchase(PowerUpKind),
    AdvanceStage,
    RestartStage,
    RestartCampaign,
}

impl From<GameAction> for Command {
    fn from(action: GameAction) -> Self {
        match action {
            GameAction::MoveLeft => Command::Move { dx: -1, dy: 0 },
            GameAction::MoveRight => Command::Move { dx: 1, dy: 0 },
            GameAction::SoftDrop => Command::SoftDrop,
            GameAction::HardDrop => Command::HardDrop,
            GameAction::Rotate => Command::Rotate,
            GameAction::Pause => Command::Pause,
            GameAction::Resume => Command::Resume,
            GameAction::UsePowerUp(kind) => Command::UsePowerUp(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    NotStarted,
    NotPlayable,
    Suspended,
    InvalidMove,
    RotationBlocked,
    NoActivePiece,
    InsufficientInventory,
    InsufficientFunds,
    NoPendingAnimation,
    StageNotCompleted,
    StageInProgress,
    CampaignComplete,
    XOutOfBounds,
    XBlocked,
}

impl CommandError {
    pub fn code(self) -> &'static str {
        match self {
            CommandError::NotStarted => "not_started",
            CommandError::NotPlayable => "not_playable",
            CommandError::Suspended => "suspended",
            CommandError::InvalidMove => "invalid_move",
            CommandError::RotationBlocked
            | CommandError::XOutOfBounds
            | CommandError::XBlocked => "invalid_place",
            CommandError::NoActivePiece => "no_active_piece",
            CommandError::InsufficientInventory => "insufficient_inventory",
            CommandError::InsufficientFunds => "insufficient_funds",
            CommandError::NoPendingAnimation => "no_pending_animation",
            CommandError::StageNotCompleted => "stage_not_completed",
            CommandError::StageInProgress => "stage_in_progress",
            CommandError::CampaignComplete => "campaign_complete",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CommandError::NotStarted => "no stage has been started",
            CommandError::NotPlayable => "stage is not running",
            CommandError::Suspended => "waiting for the line-clear animation",
            CommandError::InvalidMove => "move would collide or leave the board",
            CommandError::RotationBlocked => "could not rotate at any kick offset",
            CommandError::NoActivePiece => "no active piece",
            CommandError::InsufficientInventory => "no power-up of that kind left",
            CommandError::InsufficientFunds => "not enough money",
            CommandError::NoPendingAnimation => "no line clear is waiting for acknowledgement",
            CommandError::StageNotCompleted => "stage has not been completed",
            CommandError::StageInProgress => "store is closed while a stage is in progress",
            CommandError::CampaignComplete => "every stage has been completed",
            CommandError::XOutOfBounds => "target x would place piece out of bounds",
            CommandError::XBlocked => "could not move to target x due to collision",
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for CommandError {}

/// Input commands need a running stage with no line clear pending
pub(crate) fn ensure_input_allowed(state: &GameState) -> Result<(), CommandError> {
    match state.status() {
        StageStatus::NotStarted => Err(CommandError::NotStarted),
        StageStatus::Running if state.is_animating() => Err(CommandError::Suspended),
        StageStatus::Running => Ok(()),
        StageStatus::Paused | StageStatus::Completed | StageStatus::Failed => {
            Err(CommandError::NotPlayable)
        }
    }
}

fn ensure_active(state: &GameState) -> Result<(), CommandError> {
    if state.active().is_none() {
        return Err(CommandError::NoActivePiece);
    }
    Ok(())
}

fn accepted(ok: bool, err: CommandError) -> Result<(), CommandError> {
    if ok {
        Ok(())
    } else {
        Err(err)
    }
}

pub fn apply_command(state: &mut GameState, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Start(stage) => {
            state.start_stage(stage);
            Ok(())
        }
        Command::Pause => {
            if state.status() == StageStatus::NotStarted {
                return Err(CommandError::NotStarted);
            }
            accepted(state.pause(), CommandError::NotPlayable)
        }
        Command::Resume => {
            if state.status() == StageStatus::NotStarted {
                return Err(CommandError::NotStarted);
            }
            accepted(state.resume(), CommandError::NotPlayable)
        }
        Command::Move { dx, dy } => {
            ensure_input_allowed(state)?;
            ensure_active(state)?;
            accepted(state.try_move(dx, dy), CommandError::InvalidMove)
        }
        Command::Rotate => {
            ensure_input_allowed(state)?;
            ensure_active(state)?;
            accepted(state.try_rotate(), CommandError::RotationBlocked)
        }
        Command::SoftDrop => {
            ensure_input_allowed(state)?;
            ensure_active(state)?;
            accepted(state.soft_drop(), CommandError::NotPlayable)
        }
        Command::HardDrop => {
            ensure_input_allowed(state)?;
            ensure_active(state)?;
            accepted(state.hard_drop(), CommandError::NotPlayable)
        }
        Command::UsePowerUp(kind) => {
            ensure_input_allowed(state)?;
            if kind.needs_active_piece() {
                ensure_active(state)?;
            }
            accepted(state.use_power_up(kind), CommandError::InsufficientInventory)
        }
        Command::AnimationComplete => {
            accepted(state.finish_line_clear(), CommandError::NoPendingAnimation)
        }
        Command::Purchase(kind) => {
            if state.status().in_progress() {
                return Err(CommandError::StageInProgress);
            }
            accepted(state.purchase(kind), CommandError::InsufficientFunds)
        }
        Command::AdvanceStage => {
            if state.campaign_complete() {
                return Err(CommandError::CampaignComplete);
            }
            accepted(state.advance_stage(), CommandError::StageNotCompleted)
        }
        Command::RestartStage => {
            if state.status() == StageStatus::NotStarted {
                return Err(CommandError::NotStarted);
            }
            accepted(state.restart_stage(), CommandError::NotPlayable)
        }
        Command::RestartCampaign => {
            state.restart_campaign();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Signal;

    fn started() -> GameState {
        let mut gs = GameState::new(1);
        apply_command(&mut gs, Command::Start(1)).unwrap();
        gs.drain_signals();
        gs
    }

    #[test]
    fn input_before_start_is_rejected() {
        let mut gs = GameState::new(1);
        assert_eq!(
            apply_command(&mut gs, Command::HardDrop),
            Err(CommandError::NotStarted)
        );
        assert_eq!(apply_command(&mut gs, Command::Pause), Err(CommandError::NotStarted));
    }

    #[test]
    fn paused_stage_rejects_input() {
        let mut gs = started();
        apply_command(&mut gs, Command::Pause).unwrap();
        assert_eq!(apply_command(&mut gs, Command::Rotate), Err(CommandError::NotPlayable));
        assert_eq!(apply_command(&mut gs, Command::Pause), Err(CommandError::NotPlayable));
        apply_command(&mut gs, Command::Resume).unwrap();
        assert!(apply_command(&mut gs, Command::Move { dx: 1, dy: 0 }).is_ok());
    }

    #[test]
    fn upward_move_is_invalid() {
        let mut gs = started();
        assert_eq!(
            apply_command(&mut gs, Command::Move { dx: 0, dy: -1 }),
            Err(CommandError::InvalidMove)
        );
    }

    #[test]
    fn empty_inventory_maps_to_error_and_signal() {
        let mut gs = started();
        while gs.inventory_mut().try_consume(PowerUpKind::Trade) {}
        assert_eq!(
            apply_command(&mut gs, Command::UsePowerUp(PowerUpKind::Trade)),
            Err(CommandError::InsufficientInventory)
        );
        assert_eq!(
            gs.drain_signals(),
            vec![Signal::PowerUpError { kind: PowerUpKind::Trade }]
        );
    }

    #[test]
    fn acknowledgement_without_line_clear() {
        let mut gs = started();
        assert_eq!(
            apply_command(&mut gs, Command::AnimationComplete),
            Err(CommandError::NoPendingAnimation)
        );
    }

    #[test]
    fn store_is_closed_during_stage() {
        let mut gs = started();
        assert_eq!(
            apply_command(&mut gs, Command::Purchase(PowerUpKind::Slow)),
            Err(CommandError::StageInProgress)
        );
        assert_eq!(
            apply_command(&mut gs, Command::AdvanceStage),
            Err(CommandError::StageNotCompleted)
        );
    }

    #[test]
    fn purchase_without_money() {
        let mut gs = GameState::new(1);
        assert_eq!(
            apply_command(&mut gs, Command::Purchase(PowerUpKind::Dynamite)),
            Err(CommandError::InsufficientFunds)
        );
        assert_eq!(
            gs.drain_signals(),
            vec![Signal::PurchaseError { kind: PowerUpKind::Dynamite }]
        );
    }

    #[test]
    fn actions_convert_to_commands() {
        assert_eq!(Command::from(GameAction::MoveLeft), Command::Move { dx: -1, dy: 0 });
        assert_eq!(
            Command::from(GameAction::UsePowerUp(PowerUpKind::Slow)),
            Command::UsePowerUp(PowerUpKind::Slow)
        );
    }

    #[test]
    fn error_display_has_code_and_message() {
        let text = CommandError::Suspended.to_string();
        assert!(text.starts_with("suspended:"));
        assert_eq!(CommandError::XBlocked.code(), "invalid_place");
    }
}
