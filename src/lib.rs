//! Shadowplay - a software-rendered 2D arcade scene
//!
//! Core modules:
//! - `arena`: Fixed-capacity bump allocator backing all pixel storage
//! - `gfx`: Image buffers, blending, shadow projection, frame composition
//! - `sim`: Deterministic entity simulation (player, enemies, projectile pool)
//! - `scene`: Context object tying arena, buffers and entities together
//! - `control`/`timing`: The racy host-facing words and the FPS diagnostics
//!
//! The crate never touches a display surface: each tick it fully overwrites
//! a caller-supplied destination pixel buffer and reports numeric FPS/MPF.

pub mod arena;
pub mod control;
pub mod gfx;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod timing;

pub use arena::{Arena, ArenaError, Region};
pub use gfx::{Bounds, ImageBuffer, blend};
pub use scene::{FrameInput, Scene};
pub use settings::Settings;
pub use timing::FrameClock;

/// Scene configuration constants
pub mod consts {
    /// Native simulation resolution (all sim-side buffers share it)
    pub const SIM_WIDTH: u32 = 320;
    pub const SIM_HEIGHT: u32 = 240;

    /// Inset margin of the clip rectangle, pixels on each side
    pub const CLIP_MARGIN: f32 = 8.0;

    /// Depth of the sprite plane for shadow projection
    pub const FOREGROUND_DEPTH: f32 = 40.0;
    /// Height of the session-constant point light over the stage center
    pub const LIGHT_HEIGHT: f32 = 240.0;
    /// Fixed dark color written for every projected shadow pixel
    pub const SHADOW_COLOR: u32 = 0xff22_2222;

    /// Player speed in units/second, per axis
    pub const PLAYER_SPEED_X: f32 = 320.0;
    pub const PLAYER_SPEED_Y: f32 = 240.0;
    /// Enemies rise toward the top margin at this rate
    pub const ENEMY_RISE_SPEED: f32 = 60.0;
    /// Projectile travel speed
    pub const PROJECTILE_SPEED: f32 = 180.0;
    /// Life value a recycled projectile starts with; also the cooldown
    /// written back into the shooter's firing_rate
    pub const PROJECTILE_LIFE: f32 = 90.0;
    /// Continuous firing_rate / projectile life decay, units/second
    pub const FIRING_DECAY: f32 = 30.0;

    /// Entity batch shape: enemies, pooled projectiles, then one player
    pub const ENEMY_COUNT: usize = 10;
    pub const PROJECTILE_POOL: usize = 10;

    /// Session seed (fixed for reproducibility)
    pub const DEFAULT_SEED: u64 = 2635;

    /// Default arena capacity in bytes
    pub const ARENA_CAPACITY: usize = 4 * 1024 * 1024;
}

/// Frame-rate-normalized displacement: how far something moving at
/// `units_per_second` should travel this tick.
///
/// Derived from the last *measured* FPS, not the current frame's delta;
/// both gates return 0 so a stalled clock freezes motion instead of
/// teleporting entities.
#[inline]
pub fn compute_units(units_per_second: f32, elapsed_millis: f64, fps: f64) -> f32 {
    if elapsed_millis == 0.0 || fps == 0.0 {
        return 0.0;
    }
    units_per_second / fps as f32
}
