//! Tetrascape (workspace facade crate).
//!
//! Re-exports the implementation crates under `crates/` as `tetrascape::{types, core, engine}`,
//! and hosts the greedy [`autoplay`] policy used by the headless runner.

pub mod autoplay;

pub use tetrascape_core as core;
pub use tetrascape_engine as engine;
pub use tetrascape_types as types;
