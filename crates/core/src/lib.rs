//! Core puzzle engine - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block escape game: board, pieces,
//! line clearing, power-ups, stage goals and the in-memory economy. It has no I/O and
//! no clock of its own. A shell drives it by calling commands and
//! [`GameState::tick`](game_state::GameState::tick), then drains the outbound
//! [`Signal`](events::Signal) queue to render and sonify.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 settled-cell grid, collision validator, row detection and collapse
//! - [`pieces`]: shape matrices, clockwise rotation and wall kicks
//! - [`rng`]: seeded LCG, uniform piece generation and usage statistics
//! - [`scoring`]: line scores, hard-drop points, time bonuses, levels and rewards
//! - [`stage`]: stage clock and the completion/failure decision
//! - [`inventory`]: power-up counts
//! - [`powerups`]: board-level power-up effects
//! - [`events`]: outbound signals
//! - [`game_state`]: the aggregate tying everything together
//! - [`snapshot`]: serialisable view of the query surface
//!
//! # Example
//!
//! ```
//! use tetrascape_core::GameState;
//! use tetrascape_core::types::{GameAction, StageStatus};
//!
//! let mut game = GameState::new(12345);
//! game.start_stage(1);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.status(), StageStatus::Running);
//! assert!(game.score() > 2); // spawn bonuses plus hard-drop points
//! ```
//!
//! # Timing
//!
//! - **Frame tick**: the shell calls `tick(elapsed_ms)`, typically every 16ms
//! - **Gravity**: one row per fall interval (1000ms at level 1, 100ms less per level, 100ms floor)
//! - **Stage clock**: counts only while the stage runs and no line clear is animating
//! - **Line clear**: suspended until the shell acknowledges the pop animation

pub mod board;
pub mod events;
pub mod game_state;
pub mod inventory;
pub mod pieces;
pub mod powerups;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stage;

pub use tetrascape_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use events::{PoppedBlock, Signal, SignalQueue};
pub use game_state::{GameState, LineClearPhase};
pub use inventory::Inventory;
pub use pieces::{canonical_shape, try_rotate, ActivePiece, PieceShape};
pub use rng::{PieceGenerator, PieceStats, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use stage::{Stage, StageOutcome, StageTimer};
