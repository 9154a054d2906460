//! Headless runner (default binary).
//!
//! Plays a campaign with the greedy autoplay policy on a simulated frame clock, buying
//! power-ups between stages, then prints a summary. Configuration comes from the
//! `TETRASCAPE_*` environment variables; the first argument overrides the frame budget.

use anyhow::{Context, Result};

use tetrascape::autoplay::choose_placement;
use tetrascape::core::Signal;
use tetrascape::engine::{Command, EngineConfig, Session};
use tetrascape::types::{PieceKind, PowerUpKind, StageStatus};

const DEFAULT_FRAMES: u64 = 200_000;
/// Frames between autoplay decisions, so gravity gets a say
const THINK_EVERY_FRAMES: u64 = 6;
const MAX_RETRIES_PER_STAGE: u32 = 3;
/// Use the time-extend power-up when the clock drops to this many seconds
const LOW_TIME_SECS: i64 = 15;

#[derive(Debug, Default)]
struct Summary {
    signals: u64,
    placements: u64,
    stages_completed: u32,
    stages_failed: u32,
    items_bought: u32,
}

impl Summary {
    fn observe(&mut self, signals: &[Signal]) {
        self.signals += signals.len() as u64;
        for signal in signals {
            match signal {
                Signal::StageCompleted { stage, earned_money } => {
                    self.stages_completed += 1;
                    println!("[Tetrascape] stage {} completed, earned {}", stage, earned_money);
                }
                Signal::StageFailed { stage, cause } => {
                    self.stages_failed += 1;
                    println!("[Tetrascape] stage {} failed: {}", stage, cause.as_str());
                }
                Signal::ItemPurchased { .. } => self.items_bought += 1,
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    let frames = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("invalid frame count {:?}", arg))?,
        None => DEFAULT_FRAMES,
    };

    let config = EngineConfig::from_env();
    println!(
        "[Tetrascape] seed={} frame_ms={} start_stage={} auto_ack={}",
        config.seed, config.frame_ms, config.start_stage, config.auto_ack
    );

    let mut session = Session::new(config)?;
    let summary = run(&mut session, frames);
    session.finish()?;

    print_summary(&session, &summary);
    Ok(())
}

fn run(session: &mut Session, frames: u64) -> Summary {
    let mut summary = Summary::default();
    let mut retries = 0;

    for frame in 0..frames {
        match session.state().status() {
            StageStatus::Completed => {
                retries = 0;
                shop(session, &mut summary);
                match session.submit(Command::AdvanceStage) {
                    Ok(signals) => summary.observe(&signals),
                    Err(e) => {
                        eprintln!("[Tetrascape] cannot advance: {}", e);
                        break;
                    }
                }
                if session.state().campaign_complete() {
                    println!("[Tetrascape] campaign complete");
                    break;
                }
            }
            StageStatus::Failed => {
                if retries >= MAX_RETRIES_PER_STAGE {
                    println!("[Tetrascape] giving up after {} retries", retries);
                    break;
                }
                retries += 1;
                if let Ok(signals) = session.submit(Command::RestartStage) {
                    summary.observe(&signals);
                }
            }
            StageStatus::NotStarted | StageStatus::Paused | StageStatus::Running => {}
        }

        if frame % THINK_EVERY_FRAMES == 0 {
            think(session, &mut summary);
        }

        let signals = session.step();
        summary.observe(&signals);
    }

    summary
}

fn think(session: &mut Session, summary: &mut Summary) {
    let state = session.state();
    if !state.is_playable() {
        return;
    }

    if state.time_remaining_secs() <= LOW_TIME_SECS && state.inventory().count(PowerUpKind::Slow) > 0
    {
        if let Ok(signals) = session.submit(Command::UsePowerUp(PowerUpKind::Slow)) {
            summary.observe(&signals);
        }
        return;
    }

    let Some(placement) = choose_placement(session.state()) else {
        return;
    };
    match session.place(placement.target_x, placement.rotations) {
        Ok(signals) => {
            summary.placements += 1;
            summary.observe(&signals);
        }
        Err(e) => eprintln!("[Tetrascape] placement rejected: {}", e),
    }
}

/// Spend money on time first, then on dynamite
fn shop(session: &mut Session, summary: &mut Summary) {
    for kind in [PowerUpKind::Slow, PowerUpKind::Dynamite] {
        if session.state().money() >= kind.price() {
            if let Ok(signals) = session.submit(Command::Purchase(kind)) {
                summary.observe(&signals);
            }
        }
    }
}

fn print_summary(session: &Session, summary: &Summary) {
    let state = session.state();
    println!("[Tetrascape] frames={} signals={}", session.frame(), summary.signals);
    println!(
        "[Tetrascape] stage={} status={} score={} level={} lines={}",
        state.stage_index(),
        state.status().as_str(),
        state.score(),
        state.level(),
        state.lines()
    );
    println!(
        "[Tetrascape] placements={} completed={} failed={} bought={} money={}",
        summary.placements,
        summary.stages_completed,
        summary.stages_failed,
        summary.items_bought,
        state.money()
    );

    let stats = state.piece_stats();
    let shares: Vec<String> = PieceKind::ALL
        .iter()
        .map(|&k| format!("{}={:.1}%", k.as_str(), stats.share_percent(k)))
        .collect();
    println!("[Tetrascape] pieces: {}", shares.join(" "));
}
