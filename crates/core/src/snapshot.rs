use serde::Serialize;

use crate::inventory::Inventory;
use crate::pieces::ActivePiece;
use crate::rng::PieceStats;
use crate::types::{FailureCause, PieceKind, StageGoal, StageStatus, BOARD_HEIGHT, BOARD_WIDTH};

pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub color: u8,
    pub shape: Vec<Vec<u8>>,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            color: value.color,
            shape: value.shape.to_rows(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSnapshot {
    pub index: u32,
    pub goal: StageGoal,
    pub time_limit_secs: u32,
    pub elapsed_secs: u64,
    pub time_remaining_secs: i64,
    pub blocks_used: u32,
    pub goal_progress_percent: u32,
}

/// The whole query surface in one serialisable value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub stage: StageSnapshot,
    pub status: StageStatus,
    pub failure: Option<FailureCause>,
    pub animating: bool,
    pub inventory: Inventory,
    pub money: u32,
    pub piece_stats: PieceStats,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == StageStatus::Running && !self.animating
    }

    /// Number of non-empty cells on the board
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c != 0)
            .count()
    }
}
