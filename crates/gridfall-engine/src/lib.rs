//! Gameplay core of a falling-block puzzle game.
//!
//! The crate is the state machine and rules engine for the falling piece and
//! the playfield grid: movement, wall-kick rotation, lock-delay timing,
//! line-clear detection and compaction, scoring, and piece randomization.
//! It runs entirely synchronously: the caller drives it once per frame with a
//! time delta and a polled button snapshot, and the simulation answers with a
//! stream of draw-cell commands through the [`DrawSink`] collaborator.
//!
//! Platform concerns (windowing, input devices, actual rendering) live
//! outside this crate; see the `gridfall-tui` frontend for one adapter.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
