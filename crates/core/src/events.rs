//! Outbound signals for presentation shells
//!
//! The engine never calls into sound or rendering code. Every notable state change is pushed
//! onto a [`SignalQueue`] which the shell drains after each command or tick.

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::{ColorId, FailureCause, PieceKind, PowerUpKind};

/// One block removed by a line clear, for the pop animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoppedBlock {
    pub row: u8,
    pub col: u8,
    pub color: ColorId,
}

/// Fire-and-forget notification emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Signal {
    PieceMoved {
        dx: i8,
    },
    PieceRotated {
        kick: i8,
    },
    SoftDropped,
    #[serde(rename_all = "camelCase")]
    HardDropped {
        rows: u32,
        points: u32,
    },
    PiecePlaced {
        kind: PieceKind,
        x: i8,
        y: i8,
    },
    #[serde(rename_all = "camelCase")]
    LineClearStarted {
        rows: Vec<u8>,
        blocks: Vec<PoppedBlock>,
        animation_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    LineClearFinished {
        lines: u32,
        score_delta: u32,
        time_bonus_secs: u32,
    },
    #[serde(rename_all = "camelCase")]
    LevelUp {
        level: u32,
        fall_interval_ms: u32,
    },
    PowerUpActivated {
        kind: PowerUpKind,
    },
    /// The inventory held none of `kind`
    PowerUpError {
        kind: PowerUpKind,
    },
    StageStarted {
        stage: u32,
    },
    StagePaused,
    StageResumed,
    #[serde(rename_all = "camelCase")]
    StageCompleted {
        stage: u32,
        earned_money: u32,
    },
    StageFailed {
        stage: u32,
        cause: FailureCause,
    },
    #[serde(rename_all = "camelCase")]
    ItemPurchased {
        kind: PowerUpKind,
        price: u32,
        money_left: u32,
    },
    PurchaseError {
        kind: PowerUpKind,
    },
    #[serde(rename_all = "camelCase")]
    GameCompleted {
        total_money: u32,
    },
}

impl Signal {
    /// Short name matching the serialised `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            Signal::PieceMoved { .. } => "pieceMoved",
            Signal::PieceRotated { .. } => "pieceRotated",
            Signal::SoftDropped => "softDropped",
            Signal::HardDropped { .. } => "hardDropped",
            Signal::PiecePlaced { .. } => "piecePlaced",
            Signal::LineClearStarted { .. } => "lineClearStarted",
            Signal::LineClearFinished { .. } => "lineClearFinished",
            Signal::LevelUp { .. } => "levelUp",
            Signal::PowerUpActivated { .. } => "powerUpActivated",
            Signal::PowerUpError { .. } => "powerUpError",
            Signal::StageStarted { .. } => "stageStarted",
            Signal::StagePaused => "stagePaused",
            Signal::StageResumed => "stageResumed",
            Signal::StageCompleted { .. } => "stageCompleted",
            Signal::StageFailed { .. } => "stageFailed",
            Signal::ItemPurchased { .. } => "itemPurchased",
            Signal::PurchaseError { .. } => "purchaseError",
            Signal::GameCompleted { .. } => "gameCompleted",
        }
    }
}

/// FIFO of signals waiting for the shell
#[derive(Debug, Clone, Default)]
pub struct SignalQueue {
    pending: VecDeque<Signal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: Signal) {
        self.pending.push_back(signal);
    }

    /// Remove and return every pending signal, oldest first
    pub fn drain(&mut self) -> Vec<Signal> {
        self.pending.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
