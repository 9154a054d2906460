//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic, so they can be used by the core,
//! the command layer and any presentation shell alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Cells**: `0` is empty, `1..=7` is the color id of the piece that settled there
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_TICK_MS` | 16 | Default frame clock interval (~60 FPS) |
//! | `BASE_FALL_INTERVAL_MS` | 1000 | Fall interval at level 1 |
//! | `FALL_INTERVAL_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_FALL_INTERVAL_MS` | 100 | Fastest fall interval |
//! | `POP_STAGGER_MS` | 50 | Delay between consecutive block pops |
//! | `POP_DURATION_MS` | 400 | Duration of the last pop |
//!
//! # Stages
//!
//! | Stage | Min score | Time limit | Max blocks | Reward |
//! |-------|-----------|------------|------------|--------|
//! | 1 | 500 | 180s | 50 | 100 |
//! | 2 | 1000 | 150s | 45 | 150 |
//! | 3 | 1500 | 135s | 40 | 200 |
//! | 4 | 2500 | 120s | 35 | 300 |
//! | 5 | 4000 | 105s | 30 | 500 |
//!
//! # Examples
//!
//! ```
//! use tetrascape_types::{stage_goal, PieceKind, PowerUpKind, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color_id(), 3);
//! assert_eq!(PowerUpKind::from_str("shovel"), Some(PowerUpKind::Shovel));
//! assert_eq!(stage_goal(1).min_score, 500);
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Largest value a board cell may hold (color ids are `1..=7`).
pub const MAX_COLOR_ID: u8 = 7;

/// Timing constants (in milliseconds)
pub const FRAME_TICK_MS: u32 = 16;
pub const BASE_FALL_INTERVAL_MS: u32 = 1000;
pub const FALL_INTERVAL_STEP_MS: u32 = 100;
pub const MIN_FALL_INTERVAL_MS: u32 = 100;
pub const POP_STAGGER_MS: u32 = 50;
pub const POP_DURATION_MS: u32 = 400;

/// Scoring constants
pub const SPAWN_BONUS_POINTS: u32 = 1;
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for clearing 1, 2, 3 and 4+ lines at once (index 0 = no lines).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Seconds added to the stage time limit per cleared line (doubled for 4+ lines).
pub const LINE_CLEAR_TIME_BONUS_SECS: u32 = 2;

/// Seconds added by the time-extend power-up.
pub const SLOW_TIME_BONUS_SECS: u32 = 10;

/// Money rewards on stage completion.
pub const MONEY_PER_SECOND_LEFT: u32 = 10;
pub const MONEY_PER_BLOCK_LEFT: u32 = 5;

/// Number of stages in a campaign.
pub const MAX_STAGE: u32 = 5;

/// Power-up count seeded into the inventory when stage 1 starts.
pub const STARTING_POWER_UP_COUNT: u32 = 5;

/// Cell on the board (0 = empty, 1..=7 = color id)
pub type Cell = u8;

/// Color id of a piece (1..=7)
pub type ColorId = u8;

/// The seven canonical piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Color id written into the board when this kind settles
    pub fn color_id(&self) -> ColorId {
        self.index() as ColorId + 1
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// One-shot power-ups held in the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Area-clear: drops and settles the piece, then blasts a 3x3 area around each of its cells
    Dynamite,
    /// Column-clear: empties the column under the centre of the falling piece
    Shovel,
    /// Piece-replace: swaps the falling piece for a freshly generated one
    Trade,
    /// Time-extend: adds seconds to the stage time limit
    Slow,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Dynamite,
        PowerUpKind::Shovel,
        PowerUpKind::Trade,
        PowerUpKind::Slow,
    ];

    pub fn index(&self) -> usize {
        match self {
            PowerUpKind::Dynamite => 0,
            PowerUpKind::Shovel => 1,
            PowerUpKind::Trade => 2,
            PowerUpKind::Slow => 3,
        }
    }

    /// Store price in money units
    pub fn price(&self) -> u32 {
        match self {
            PowerUpKind::Dynamite => 50,
            PowerUpKind::Shovel => 75,
            PowerUpKind::Trade => 40,
            PowerUpKind::Slow => 60,
        }
    }

    /// Whether the effect operates on the falling piece
    pub fn needs_active_piece(&self) -> bool {
        !matches!(self, PowerUpKind::Slow)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dynamite" => Some(PowerUpKind::Dynamite),
            "shovel" => Some(PowerUpKind::Shovel),
            "trade" => Some(PowerUpKind::Trade),
            "slow" => Some(PowerUpKind::Slow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Dynamite => "dynamite",
            PowerUpKind::Shovel => "shovel",
            PowerUpKind::Trade => "trade",
            PowerUpKind::Slow => "slow",
        }
    }
}

/// Player actions a shell can forward to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Pause,
    Resume,
    UsePowerUp(PowerUpKind),
}

impl GameAction {
    /// Parse action from string (for scripted shells)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            other => PowerUpKind::from_str(other).map(GameAction::UsePowerUp),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::UsePowerUp(kind) => kind.as_str(),
        }
    }
}

/// Per-stage goal record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageGoal {
    pub min_score: u32,
    pub time_limit_secs: u32,
    pub max_blocks: u32,
    pub reward: u32,
}

/// Stage goals in ascending difficulty (stage 1 first)
pub const STAGE_GOALS: [StageGoal; MAX_STAGE as usize] = [
    StageGoal { min_score: 500, time_limit_secs: 180, max_blocks: 50, reward: 100 },
    StageGoal { min_score: 1000, time_limit_secs: 150, max_blocks: 45, reward: 150 },
    StageGoal { min_score: 1500, time_limit_secs: 135, max_blocks: 40, reward: 200 },
    StageGoal { min_score: 2500, time_limit_secs: 120, max_blocks: 35, reward: 300 },
    StageGoal { min_score: 4000, time_limit_secs: 105, max_blocks: 30, reward: 500 },
];

/// Look up the goal for a 1-based stage index (clamped to the table)
pub fn stage_goal(stage: u32) -> StageGoal {
    let idx = (stage.max(1) - 1).min(MAX_STAGE - 1) as usize;
    STAGE_GOALS[idx]
}

/// Lifecycle of the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageStatus {
    NotStarted,
    Running,
    Paused,
    Completed,
    Failed,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::NotStarted => "notStarted",
            StageStatus::Running => "running",
            StageStatus::Paused => "paused",
            StageStatus::Completed => "completed",
            StageStatus::Failed => "failed",
        }
    }

    /// Whether a stage is underway (running or paused)
    pub fn in_progress(&self) -> bool {
        matches!(self, StageStatus::Running | StageStatus::Paused)
    }
}

/// Why a stage ended in failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureCause {
    /// A freshly activated piece could not be placed at its spawn position
    TopOut,
    TimeUp,
    BlocksExhausted,
}

impl FailureCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCause::TopOut => "topOut",
            FailureCause::TimeUp => "timeUp",
            FailureCause::BlocksExhausted => "blocksExhausted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_cover_one_to_seven() {
        let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color_id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(ids.iter().all(|&id| id <= MAX_COLOR_ID));
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn power_up_parsing_and_prices() {
        assert_eq!(PowerUpKind::from_str("DYNAMITE"), Some(PowerUpKind::Dynamite));
        assert_eq!(PowerUpKind::from_str("hammer"), None);
        assert_eq!(PowerUpKind::Dynamite.price(), 50);
        assert_eq!(PowerUpKind::Shovel.price(), 75);
        assert_eq!(PowerUpKind::Trade.price(), 40);
        assert_eq!(PowerUpKind::Slow.price(), 60);
        assert!(!PowerUpKind::Slow.needs_active_piece());
        assert!(PowerUpKind::Trade.needs_active_piece());
    }

    #[test]
    fn game_action_parses_power_ups() {
        assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
        assert_eq!(
            GameAction::from_str("slow"),
            Some(GameAction::UsePowerUp(PowerUpKind::Slow))
        );
        assert_eq!(GameAction::UsePowerUp(PowerUpKind::Trade).as_str(), "trade");
        assert_eq!(GameAction::from_str("hold"), None);
    }

    #[test]
    fn stage_goal_lookup_clamps() {
        assert_eq!(stage_goal(0), STAGE_GOALS[0]);
        assert_eq!(stage_goal(3).reward, 200);
        assert_eq!(stage_goal(5).min_score, 4000);
        assert_eq!(stage_goal(99), STAGE_GOALS[4]);
    }
}
