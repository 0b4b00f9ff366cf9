//! Entity simulation.
//!
//! Deterministic by construction: seeded RNG, a flat entity vector with a
//! stable order (player last), and per-tick displacement derived from the
//! measured FPS. No rendering device dependencies; sprites land in a plain
//! foreground buffer.

pub mod entity;
pub mod tick;

pub use entity::{ClipRect, Entity, EntityKind, spawn_batch};
pub use tick::{Direction, FrameInput, simulate};
