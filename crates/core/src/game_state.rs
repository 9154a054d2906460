//! Game state module - the single aggregate the engine operates on
//!
//! Ties together board, pieces, generator, scoring, stage clock, inventory and money.
//! All input-producing operations are rejected (return false) unless the stage is running
//! and no line clear is waiting for its animation acknowledgement.
//!
//! Placement follows one pipeline:
//!
//! ```text
//! FALLING -> SETTLED -> (no full rows) --------------------------------> SPAWN_NEXT
//!                    \-> POPPING --ack--> COLLAPSING -> SCORED ----------> SPAWN_NEXT
//! ```

use std::mem;

use crate::board::{Board, FullRows};
use crate::events::{PoppedBlock, Signal, SignalQueue};
use crate::inventory::Inventory;
use crate::pieces::{self, ActivePiece};
use crate::powerups;
use crate::rng::{PieceGenerator, PieceStats};
use crate::scoring::{
    calculate_hard_drop_score, calculate_line_score, calculate_time_bonus_secs,
    get_fall_interval_ms, goal_progress_percent, next_level,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, StageSnapshot};
use crate::stage::{Stage, StageOutcome};
use crate::types::*;

/// Line-clear pipeline phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClearPhase {
    Idle,
    /// Matched rows are emptied and the shell is animating the pops
    Popping { rows: FullRows, animation_ms: u32 },
}

/// Animation duration for popping `block_count` blocks
pub fn pop_animation_ms(block_count: usize) -> u32 {
    block_count as u32 * POP_STAGGER_MS + POP_DURATION_MS
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<ActivePiece>,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    fall_interval_ms: u32,
    drop_timer_ms: u32,
    line_clear: LineClearPhase,
    stage: Stage,
    status: StageStatus,
    failure: Option<FailureCause>,
    /// Money earned by the last completed stage
    last_reward: u32,
    inventory: Inventory,
    money: u32,
    campaign_complete: bool,
    signals: SignalQueue,
}

impl GameState {
    /// Create a new game with the given RNG seed. No stage is started.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            generator: PieceGenerator::new(seed),
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: get_fall_interval_ms(1),
            drop_timer_ms: 0,
            line_clear: LineClearPhase::Idle,
            stage: Stage::new(1),
            status: StageStatus::NotStarted,
            failure: None,
            last_reward: 0,
            inventory: Inventory::new(),
            money: 0,
            campaign_complete: false,
            signals: SignalQueue::new(),
        }
    }

    /// Start (or restart) a stage by 1-based index.
    ///
    /// Resets board, score, level, lines, statistics, blocks used, the clock and the
    /// line-clear phase. Stage 1 also seeds the inventory. An index past the last stage
    /// completes the campaign instead. Returns true if a stage started.
    pub fn start_stage(&mut self, index: u32) -> bool {
        if index > MAX_STAGE {
            self.complete_campaign();
            return false;
        }
        let index = index.max(1);

        self.board.clear();
        self.active = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.fall_interval_ms = get_fall_interval_ms(1);
        self.drop_timer_ms = 0;
        self.line_clear = LineClearPhase::Idle;
        self.generator.reset_stats();
        self.stage = Stage::new(index);
        self.failure = None;
        self.last_reward = 0;
        self.campaign_complete = false;
        if index == 1 {
            self.inventory = Inventory::starting();
        }

        self.status = StageStatus::Running;
        self.signals.push(Signal::StageStarted { stage: index });

        let first = self.spawn_piece();
        self.active = Some(first);
        let next = self.spawn_piece();
        self.next = Some(next);
        true
    }

    /// Suspend a running stage; the clock and gravity stop
    pub fn pause(&mut self) -> bool {
        if self.status != StageStatus::Running {
            return false;
        }
        self.status = StageStatus::Paused;
        self.signals.push(Signal::StagePaused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != StageStatus::Paused {
            return false;
        }
        self.status = StageStatus::Running;
        self.signals.push(Signal::StageResumed);
        true
    }

    /// Running and not waiting on a line-clear animation
    pub fn is_playable(&self) -> bool {
        self.status == StageStatus::Running && !self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.line_clear, LineClearPhase::Popping { .. })
    }

    /// Draw a piece and award the spawn bonus
    fn spawn_piece(&mut self) -> ActivePiece {
        self.score += SPAWN_BONUS_POINTS;
        self.generator.spawn()
    }

    /// Move the active piece without any playability check
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let (Some(x), Some(y)) = (active.x.checked_add(dx), active.y.checked_add(dy)) else {
            return false;
        };
        if !self.board.is_valid_placement(x, y, &active.shape) {
            return false;
        }
        self.active = Some(ActivePiece { x, y, ..active });
        true
    }

    /// Try to move the active piece. Pieces never move up; horizontal moves emit a move signal.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if dy < 0 || !self.is_playable() || !self.shift(dx, dy) {
            return false;
        }
        if dx != 0 {
            self.signals.push(Signal::PieceMoved { dx });
        }
        true
    }

    /// Move down one row, or place the piece if it cannot fall
    fn step_down(&mut self) {
        if self.active.is_none() {
            return;
        }
        if self.shift(0, 1) {
            self.signals.push(Signal::SoftDropped);
        } else {
            self.place();
        }
    }

    /// One row down; a piece that cannot fall is placed. Returns false if rejected.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_playable() || self.active.is_none() {
            return false;
        }
        self.step_down();
        true
    }

    /// Drop to the floor, award 2 points per row and place
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_playable() || self.active.is_none() {
            return false;
        }
        let mut rows = 0;
        while self.shift(0, 1) {
            rows += 1;
        }
        let points = calculate_hard_drop_score(rows);
        self.score += points;
        self.signals.push(Signal::HardDropped { rows, points });
        self.place();
        true
    }

    /// Rotate clockwise, trying wall kicks +1, -1, +2, -2 after the in-place position
    pub fn try_rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let board = &self.board;
        let Some((shape, kick)) = pieces::try_rotate(&active.shape, active.x, active.y, |x, y, s| {
            board.is_valid_placement(x, y, s)
        }) else {
            return false;
        };
        self.active = Some(ActivePiece {
            shape,
            x: active.x + kick,
            ..active
        });
        self.signals.push(Signal::PieceRotated { kick });
        true
    }

    /// Settle the active piece into the board and run the line-clear pipeline
    fn place(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.board.settle(&piece.shape, piece.x, piece.y, piece.color);
        self.signals.push(Signal::PiecePlaced {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
        });
        self.resolve_settled();
    }

    /// After a settle: animate full rows, or advance straight to the next piece
    fn resolve_settled(&mut self) {
        let rows = self.board.detect_full_rows();
        if rows.is_empty() {
            self.spawn_next();
            self.evaluate();
            return;
        }

        let mut blocks = Vec::with_capacity(rows.len() * BOARD_WIDTH as usize);
        for &y in &rows {
            for (x, &color) in self.board.row(y).iter().enumerate() {
                if color != 0 {
                    blocks.push(PoppedBlock {
                        row: y as u8,
                        col: x as u8,
                        color,
                    });
                }
            }
        }
        let animation_ms = pop_animation_ms(blocks.len());

        self.board.clear_rows(&rows);
        self.signals.push(Signal::LineClearStarted {
            rows: rows.iter().map(|&y| y as u8).collect(),
            blocks,
            animation_ms,
        });
        self.line_clear = LineClearPhase::Popping { rows, animation_ms };
    }

    /// Acknowledge the pop animation: collapse, score, maybe level up, then spawn.
    /// Returns false when no line clear is pending.
    pub fn finish_line_clear(&mut self) -> bool {
        let LineClearPhase::Popping { rows, .. } =
            mem::replace(&mut self.line_clear, LineClearPhase::Idle)
        else {
            return false;
        };

        let cleared = self.board.collapse(&rows);
        let score_delta = calculate_line_score(cleared);
        let time_bonus_secs = calculate_time_bonus_secs(cleared);
        self.score += score_delta;
        self.stage.timer_mut().extend(time_bonus_secs);
        self.lines += cleared as u32;

        let level = next_level(self.level, self.lines);
        if level != self.level {
            self.level = level;
            self.fall_interval_ms = get_fall_interval_ms(level);
            self.signals.push(Signal::LevelUp {
                level,
                fall_interval_ms: self.fall_interval_ms,
            });
        }

        self.signals.push(Signal::LineClearFinished {
            lines: cleared as u32,
            score_delta,
            time_bonus_secs,
        });

        self.spawn_next();
        self.evaluate();
        true
    }

    /// Promote the next piece, generate a new one, count the block and check for top-out
    fn spawn_next(&mut self) {
        self.stage.record_block();
        let promoted = match self.next.take() {
            Some(piece) => piece,
            None => self.spawn_piece(),
        };
        let next = self.spawn_piece();
        self.next = Some(next);
        self.activate(promoted);
    }

    /// Make `piece` the active piece; fail the stage if it cannot sit at its position
    fn activate(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
        if !self.board.is_valid_placement(piece.x, piece.y, &piece.shape) {
            self.fail(FailureCause::TopOut);
        }
    }

    fn fail(&mut self, cause: FailureCause) {
        if !self.status.in_progress() {
            return;
        }
        self.status = StageStatus::Failed;
        self.failure = Some(cause);
        self.signals.push(Signal::StageFailed {
            stage: self.stage.index(),
            cause,
        });
    }

    fn complete(&mut self) {
        let reward = self.stage.reward();
        self.money += reward;
        self.last_reward = reward;
        self.status = StageStatus::Completed;
        self.signals.push(Signal::StageCompleted {
            stage: self.stage.index(),
            earned_money: reward,
        });
    }

    fn complete_campaign(&mut self) {
        self.campaign_complete = true;
        self.signals.push(Signal::GameCompleted {
            total_money: self.money,
        });
    }

    /// Decide completion or failure; only while running and not animating
    fn evaluate(&mut self) {
        if !self.is_playable() {
            return;
        }
        match self.stage.evaluate(self.score) {
            Some(StageOutcome::Completed) => self.complete(),
            Some(StageOutcome::Failed(cause)) => self.fail(cause),
            None => {}
        }
    }

    /// Frame tick: advance the stage clock and gravity.
    /// Returns true if gravity stepped the active piece.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let running = self.is_playable();
        self.stage.timer_mut().tick_if_running(elapsed_ms, running);
        if !running {
            return false;
        }

        self.evaluate();
        if !self.is_playable() {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < self.fall_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;
        self.step_down();
        true
    }

    /// Use one power-up from the inventory.
    ///
    /// Returns false when the stage is not playable, when the power-up needs a falling
    /// piece and there is none, or when the inventory is empty (a power-up error signal is
    /// emitted in that last case).
    pub fn use_power_up(&mut self, kind: PowerUpKind) -> bool {
        if !self.is_playable() {
            return false;
        }
        if kind.needs_active_piece() && self.active.is_none() {
            return false;
        }
        if !self.inventory.try_consume(kind) {
            self.signals.push(Signal::PowerUpError { kind });
            return false;
        }
        self.signals.push(Signal::PowerUpActivated { kind });

        match kind {
            PowerUpKind::Dynamite => self.detonate(),
            PowerUpKind::Shovel => {
                if let Some(piece) = self.active {
                    powerups::column_clear(&mut self.board, &piece);
                }
            }
            PowerUpKind::Trade => {
                let fresh = self.spawn_piece();
                self.activate(fresh);
            }
            PowerUpKind::Slow => self.stage.timer_mut().extend(SLOW_TIME_BONUS_SECS),
        }

        self.evaluate();
        true
    }

    /// Drop the active piece, settle it, then blast around every cell it occupies
    fn detonate(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        while self
            .board
            .is_valid_placement(piece.x, piece.y + 1, &piece.shape)
        {
            piece.y += 1;
        }

        let centers = powerups::explosion_centers(&piece);
        self.board.settle(&piece.shape, piece.x, piece.y, piece.color);
        self.signals.push(Signal::PiecePlaced {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
        });
        powerups::area_clear(&mut self.board, &centers);
        self.resolve_settled();
    }

    /// Buy one power-up. Only allowed between stages.
    ///
    /// Returns false if a stage is in progress; emits a purchase error and returns false
    /// when money is short.
    pub fn purchase(&mut self, kind: PowerUpKind) -> bool {
        if self.status.in_progress() {
            return false;
        }
        let price = kind.price();
        if self.money < price {
            self.signals.push(Signal::PurchaseError { kind });
            return false;
        }
        self.money -= price;
        self.inventory.add(kind, 1);
        self.signals.push(Signal::ItemPurchased {
            kind,
            price,
            money_left: self.money,
        });
        true
    }

    /// Move on from a completed stage; past the last stage the campaign completes
    pub fn advance_stage(&mut self) -> bool {
        if self.status != StageStatus::Completed || self.campaign_complete {
            return false;
        }
        let index = self.stage.index();
        if index >= MAX_STAGE {
            self.complete_campaign();
            return true;
        }
        self.start_stage(index + 1)
    }

    pub fn restart_stage(&mut self) -> bool {
        self.start_stage(self.stage.index())
    }

    /// Forget all money and start over at stage 1
    pub fn restart_campaign(&mut self) -> bool {
        self.money = 0;
        self.campaign_complete = false;
        self.start_stage(1)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::UsePowerUp(kind) => self.use_power_up(kind),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Replace the falling piece (scenario setup); the position is not validated
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    pub fn next(&self) -> Option<ActivePiece> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_index(&self) -> u32 {
        self.stage.index()
    }

    pub fn goal(&self) -> &StageGoal {
        self.stage.goal()
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn failure(&self) -> Option<FailureCause> {
        self.failure
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.stage.timer().limit_secs()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.stage.timer().elapsed_secs()
    }

    pub fn time_remaining_secs(&self) -> i64 {
        self.stage.time_remaining_secs()
    }

    pub fn blocks_used(&self) -> u32 {
        self.stage.blocks_used()
    }

    pub fn goal_progress_percent(&self) -> u32 {
        goal_progress_percent(self.score, self.stage.goal().min_score)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Inventory carried in from outside (persistence belongs to the shell)
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn set_money(&mut self, money: u32) {
        self.money = money;
    }

    pub fn last_reward(&self) -> u32 {
        self.last_reward
    }

    pub fn campaign_complete(&self) -> bool {
        self.campaign_complete
    }

    pub fn line_clear_phase(&self) -> &LineClearPhase {
        &self.line_clear
    }

    /// Duration of the pending pop animation, if any
    pub fn pending_animation_ms(&self) -> Option<u32> {
        match self.line_clear {
            LineClearPhase::Popping { animation_ms, .. } => Some(animation_ms),
            LineClearPhase::Idle => None,
        }
    }

    pub fn piece_stats(&self) -> &PieceStats {
        self.generator.stats()
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn signals(&self) -> &SignalQueue {
        &self.signals
    }

    /// Take every pending signal, oldest first
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.signals.drain()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.board.write_u8_grid(&mut board);

        GameSnapshot {
            board,
            active: self.active.map(ActiveSnapshot::from),
            next: self.next.map(|p| p.kind),
            score: self.score,
            level: self.level,
            lines: self.lines,
            fall_interval_ms: self.fall_interval_ms,
            stage: StageSnapshot {
                index: self.stage.index(),
                goal: *self.stage.goal(),
                time_limit_secs: self.time_limit_secs(),
                elapsed_secs: self.elapsed_secs(),
                time_remaining_secs: self.time_remaining_secs(),
                blocks_used: self.blocks_used(),
                goal_progress_percent: self.goal_progress_percent(),
            },
            status: self.status,
            failure: self.failure,
            animating: self.is_animating(),
            inventory: self.inventory,
            money: self.money,
            piece_stats: *self.generator.stats(),
            seed: self.seed(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
