//! Engine layer - commands, placement, configuration, signal logging and the session driver
//!
//! The core crate exposes boolean operations and a signal queue. This crate wraps them in a
//! typed [`Command`] surface with [`CommandError`] reasons, plus the pieces a shell needs to
//! run a game: environment configuration, a JSONL log of every signal and a frame-driven
//! [`Session`] that can acknowledge line-clear animations on its own.

pub mod command;
pub mod config;
pub mod log;
pub mod place;
pub mod session;

pub use tetrascape_core as core;
pub use tetrascape_types as types;

pub use command::{apply_command, Command, CommandError};
pub use config::EngineConfig;
pub use log::SignalLog;
pub use place::apply_place;
pub use session::Session;
