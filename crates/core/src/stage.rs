//! Stage module - timed stage goals and the completion/failure decision
//!
//! A stage is won by reaching the goal score while time remains; it is lost when the
//! clock runs out or the block budget is spent. The timer only counts while the caller
//! says the stage is running, so pausing never accrues time.

use crate::scoring::calculate_stage_reward;
use crate::types::{stage_goal, FailureCause, StageGoal};

/// Stage clock: elapsed time against an extendable limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimer {
    elapsed_ms: u64,
    limit_secs: u32,
}

impl StageTimer {
    pub fn new(limit_secs: u32) -> Self {
        Self {
            elapsed_ms: 0,
            limit_secs,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whole seconds elapsed (rounded down)
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    /// Seconds left on the clock; zero or negative once time is up
    pub fn remaining_secs(&self) -> i64 {
        self.limit_secs as i64 - self.elapsed_secs() as i64
    }

    pub fn is_up(&self) -> bool {
        self.remaining_secs() <= 0
    }

    /// Add seconds to the limit
    pub fn extend(&mut self, secs: u32) {
        self.limit_secs = self.limit_secs.saturating_add(secs);
    }

    pub fn tick_if_running(&mut self, dt_ms: u32, running: bool) {
        if !running {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms as u64);
    }
}

/// Result of evaluating a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    Failed(FailureCause),
}

/// Mutable per-stage state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    index: u32,
    goal: StageGoal,
    timer: StageTimer,
    blocks_used: u32,
}

impl Stage {
    /// Fresh state for a 1-based stage index
    pub fn new(index: u32) -> Self {
        let goal = stage_goal(index);
        Self {
            index: index.max(1),
            goal,
            timer: StageTimer::new(goal.time_limit_secs),
            blocks_used: 0,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn goal(&self) -> &StageGoal {
        &self.goal
    }

    pub fn timer(&self) -> &StageTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut StageTimer {
        &mut self.timer
    }

    pub fn blocks_used(&self) -> u32 {
        self.blocks_used
    }

    pub fn record_block(&mut self) {
        self.blocks_used += 1;
    }

    pub fn time_remaining_secs(&self) -> i64 {
        self.timer.remaining_secs()
    }

    /// Decide completion or failure for the current score.
    ///
    /// Completion is checked first: reaching the goal with time on the clock wins even if
    /// the block budget is exhausted at the same moment.
    pub fn evaluate(&self, score: u32) -> Option<StageOutcome> {
        let remaining = self.timer.remaining_secs();
        if score >= self.goal.min_score && remaining > 0 {
            Some(StageOutcome::Completed)
        } else if remaining <= 0 {
            Some(StageOutcome::Failed(FailureCause::TimeUp))
        } else if self.blocks_used >= self.goal.max_blocks {
            Some(StageOutcome::Failed(FailureCause::BlocksExhausted))
        } else {
            None
        }
    }

    /// Money earned if the stage completed right now
    pub fn reward(&self) -> u32 {
        calculate_stage_reward(&self.goal, self.timer.remaining_secs(), self.blocks_used)
    }
}
