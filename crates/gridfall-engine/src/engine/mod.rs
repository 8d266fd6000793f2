//! Simulation orchestration on top of the core data structures.
//!
//! - [`Game`] - the per-tick state machine (spawn, fall, lock, clear)
//! - [`PieceQueue`] - upcoming-piece randomizer with repeat avoidance
//! - [`ButtonSnapshot`] / [`InputTracker`] - polled input and edge detection
//! - [`DrawSink`] - the presentation collaborator draw commands go to
//!
//! The whole module is synchronous: the external tick driver calls
//! [`Game::tick`] exactly once per frame with that frame's time delta and
//! button snapshot, and the draw commands emitted at the end of the tick
//! always reflect that tick's post-resolution state.

pub use self::{draw::*, game::*, input::*, queue::*};

mod draw;
mod game;
mod input;
mod queue;
