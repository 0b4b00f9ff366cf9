//! The two words the host mutates while the update loop runs.
//!
//! Input handling and window plumbing live outside the core; all that
//! crosses the boundary is a run flag and a direction code. Both are
//! tolerably racy single-word reads - relaxed atomics avoid word tearing,
//! nothing more is promised or needed. A stop request only takes effect at
//! the top of the next loop iteration.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::sim::Direction;

#[derive(Debug)]
pub struct ControlFlags {
    running: AtomicBool,
    direction: AtomicI32,
}

impl ControlFlags {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            direction: AtomicI32::new(Direction::Idle.code()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Request a cooperative stop; observed at the next iteration boundary.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Host-side write of the raw direction code.
    pub fn set_direction_code(&self, code: i32) {
        self.direction.store(code, Ordering::Relaxed);
    }

    /// Loop-side read, decoded; unknown codes read as idle.
    pub fn direction(&self) -> Direction {
        Direction::from_code(self.direction.load(Ordering::Relaxed))
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self::new()
    }
}
