//! Scoring module - points, time bonuses, levels and stage rewards
//!
//! All functions are pure so the rules can be tested without a running game:
//! - Line clears: 100 / 300 / 500 / 800 for 1 / 2 / 3 / 4+ lines, independent of level.
//! - Hard drop: 2 points per row fallen.
//! - Time bonus: 2 seconds per cleared line, doubled for 4+ lines.
//! - Level: rises by one whenever total lines reach `level * 10`.

use crate::types::{
    StageGoal, BASE_FALL_INTERVAL_MS, FALL_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_CLEAR_TIME_BONUS_SECS, LINE_SCORES, MIN_FALL_INTERVAL_MS,
    MONEY_PER_BLOCK_LEFT, MONEY_PER_SECOND_LEFT,
};

/// Points for clearing `lines` rows at once
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points for a hard drop of `rows` rows
pub fn calculate_hard_drop_score(rows: u32) -> u32 {
    rows * HARD_DROP_POINTS_PER_ROW
}

/// Seconds added to the stage time limit for clearing `lines` rows at once
pub fn calculate_time_bonus_secs(lines: usize) -> u32 {
    let bonus = lines as u32 * LINE_CLEAR_TIME_BONUS_SECS;
    if lines >= 4 {
        bonus * 2
    } else {
        bonus
    }
}

/// Level after a clear: one step up once `total_lines` reaches `level * 10`
pub fn next_level(level: u32, total_lines: u32) -> u32 {
    if total_lines >= level * LINES_PER_LEVEL {
        level + 1
    } else {
        level
    }
}

/// Fall interval for a level (1-based), in milliseconds
pub fn get_fall_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(FALL_INTERVAL_STEP_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(step)
        .max(MIN_FALL_INTERVAL_MS)
}

/// Money earned for completing a stage
pub fn calculate_stage_reward(goal: &StageGoal, time_remaining_secs: i64, blocks_used: u32) -> u32 {
    let time_bonus = time_remaining_secs.max(0) as u32 * MONEY_PER_SECOND_LEFT;
    let block_bonus = goal.max_blocks.saturating_sub(blocks_used) * MONEY_PER_BLOCK_LEFT;
    goal.reward + time_bonus + block_bonus
}

/// Progress toward the stage score goal, in percent (capped at 100)
pub fn goal_progress_percent(score: u32, min_score: u32) -> u32 {
    if min_score == 0 {
        return 100;
    }
    ((score as u64 * 100 / min_score as u64).min(100)) as u32
}
