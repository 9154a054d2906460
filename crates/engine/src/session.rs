//! Session driver - owns a game, a frame clock and the animation acknowledgement
//!
//! The core suspends on every line clear until it hears "animation complete". A real shell
//! sends that when its pop animation ends; a headless session can do it itself by counting
//! down the announced animation duration on the frame clock (`auto_ack`).

use anyhow::Result;

use crate::command::{apply_command, Command, CommandError};
use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState, Signal};
use crate::log::SignalLog;
use crate::place::apply_place;

pub struct Session {
    state: GameState,
    config: EngineConfig,
    log: Option<SignalLog>,
    /// Milliseconds left on a pending pop animation (auto-ack only)
    ack_countdown_ms: Option<u32>,
    frame: u64,
}

impl Session {
    /// Build a session and start the configured stage
    pub fn new(config: EngineConfig) -> Result<Self> {
        let log = match config.log_path.as_deref() {
            Some(path) => Some(SignalLog::open(path)?),
            None => None,
        };
        let mut session = Self::with_log(config, log);
        let stage = session.config.start_stage;
        let _ = session.submit(Command::Start(stage));
        Ok(session)
    }

    fn with_log(config: EngineConfig, log: Option<SignalLog>) -> Self {
        Self {
            state: GameState::new(config.seed),
            config,
            log,
            ack_countdown_ms: None,
            frame: 0,
        }
    }

    /// Session without a log file, whatever the config says
    pub fn in_memory(config: EngineConfig) -> Self {
        let mut session = Self::with_log(config, None);
        let stage = session.config.start_stage;
        let _ = session.submit(Command::Start(stage));
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// One frame of the clock: count down a pending animation, then tick the game.
    /// Returns the signals emitted during the frame.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<Signal> {
        self.frame += 1;

        if let Some(left) = self.ack_countdown_ms {
            let left = left.saturating_sub(elapsed_ms);
            if left == 0 {
                self.ack_countdown_ms = None;
                let _ = apply_command(&mut self.state, Command::AnimationComplete);
            } else {
                self.ack_countdown_ms = Some(left);
            }
        }

        self.state.tick(elapsed_ms);
        self.flush_signals()
    }

    /// Advance one configured frame
    pub fn step(&mut self) -> Vec<Signal> {
        let frame_ms = self.config.frame_ms;
        self.advance(frame_ms)
    }

    /// Apply a command; on success return the signals it produced
    pub fn submit(&mut self, command: Command) -> Result<Vec<Signal>, CommandError> {
        let result = apply_command(&mut self.state, command);
        let signals = self.flush_signals();
        result.map(|()| signals)
    }

    /// Macro placement (see [`apply_place`]); on success return the signals it produced
    pub fn place(&mut self, target_x: i8, rotations: u8) -> Result<Vec<Signal>, CommandError> {
        let result = apply_place(&mut self.state, target_x, rotations);
        let signals = self.flush_signals();
        result.map(|()| signals)
    }

    /// Drain the queue into the log and arm the auto-ack countdown when a clear begins
    fn flush_signals(&mut self) -> Vec<Signal> {
        let signals = self.state.drain_signals();
        if self.config.auto_ack {
            for signal in &signals {
                if let Signal::LineClearStarted { animation_ms, .. } = signal {
                    self.ack_countdown_ms = Some(*animation_ms);
                }
            }
        }
        if !self.state.is_animating() {
            self.ack_countdown_ms = None;
        }
        if let Some(log) = self.log.as_mut() {
            log.record(self.frame, &signals);
        }
        signals
    }

    pub fn finish(&mut self) -> Result<()> {
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }
}
