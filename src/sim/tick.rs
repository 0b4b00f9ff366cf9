//! Per-tick entity update rules.
//!
//! Each entity, in order: integrate position, apply type behavior, clamp to
//! the clip rectangle, blit its sprite. The player is steered by the host's
//! direction code; enemies rise and respawn at the bottom; projectiles are
//! a fixed pool recycled from whichever shooter's cooldown has expired.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::entity::{ClipRect, Entity, EntityKind, spawn_batch};
use crate::arena::Arena;
use crate::compute_units;
use crate::consts::{
    ENEMY_RISE_SPEED, FIRING_DECAY, PLAYER_SPEED_X, PLAYER_SPEED_Y, PROJECTILE_LIFE,
    PROJECTILE_SPEED,
};
use crate::gfx::{Bounds, ImageBuffer};

/// Host direction code, one word per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Idle,
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Decode the host's code: -1 idle, 0 left, 1 up, 2 right, 3 down.
    /// Anything else reads as idle.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Direction::Left,
            1 => Direction::Up,
            2 => Direction::Right,
            3 => Direction::Down,
            _ => Direction::Idle,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Direction::Idle => -1,
            Direction::Left => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }
}

/// Everything the host hands the core for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Milliseconds the previous frame took.
    pub elapsed_millis: f64,
    /// Instantaneous FPS as last measured by the host (roughly once per
    /// second). All movement is normalized against this, not the delta.
    pub fps: f64,
    pub direction: Direction,
}

/// Advance every entity one tick and blit sprites into `foreground`.
///
/// The first call with an empty collection spawns the session batch from
/// the seeded RNG; after that the records only mutate in place.
pub fn simulate(
    entities: &mut Vec<Entity>,
    textures: &[ImageBuffer],
    foreground: &mut ImageBuffer,
    arena: &mut Arena,
    rng: &mut Pcg32,
    input: &FrameInput,
) {
    let bounds = foreground.bounds;
    let clip = ClipRect::from_bounds(bounds);

    if entities.is_empty() {
        *entities = spawn_batch(rng, &clip, bounds);
        log::info!("spawned entity batch of {}", entities.len());
    }

    if let Some(player) = entities.last_mut() {
        steer_player(player, input);
    }
    let player_pos = entities.last().map(|e| e.pos).unwrap_or_default();

    let decay = compute_units(FIRING_DECAY, input.elapsed_millis, input.fps);
    let rise = compute_units(ENEMY_RISE_SPEED, input.elapsed_millis, input.fps);

    for idx in 0..entities.len() {
        {
            let e = &mut entities[idx];
            e.pos += e.vel;
        }

        match entities[idx].kind {
            EntityKind::Player => {
                entities[idx].firing_rate -= decay;
            }
            EntityKind::Enemy => {
                let e = &mut entities[idx];
                if e.life != 0.0 {
                    e.vel.y = -rise;
                }
                e.firing_rate -= decay;
                // Reached the top margin: respawn across the bottom
                if e.pos.y <= clip.min.y {
                    e.pos.x = clip.random_x(rng);
                    e.pos.y = clip.max.y;
                }
            }
            EntityKind::Projectile => {
                if entities[idx].life <= 0.0 {
                    recycle_projectile(entities, idx, player_pos, input);
                } else {
                    let e = &mut entities[idx];
                    e.life -= e.cooldown * decay;
                }
            }
        }

        let e = &mut entities[idx];
        e.pos = clip.clamp(e.pos);

        let kind = e.kind;
        let pos = e.pos;
        // Pooled projectiles waiting for a shooter stay invisible
        if kind == EntityKind::Projectile && entities[idx].life <= 0.0 {
            continue;
        }
        let Some(texture) = textures.get(kind.texture_index()) else {
            continue;
        };
        if texture.bounds.is_empty() {
            continue;
        }
        let (fg_px, tex_px) = foreground.pixels_pair_mut(texture, arena);
        blit_sprite(fg_px, bounds, tex_px, texture.bounds, pos);
    }
}

/// Velocity straight from the direction code, one axis at a time; idle
/// zeroes both. Up is negative y.
fn steer_player(player: &mut Entity, input: &FrameInput) {
    let ux = compute_units(PLAYER_SPEED_X, input.elapsed_millis, input.fps);
    let uy = compute_units(PLAYER_SPEED_Y, input.elapsed_millis, input.fps);
    match input.direction {
        Direction::Idle => player.vel = Vec2::ZERO,
        Direction::Left => player.vel.x = -ux,
        Direction::Right => player.vel.x = ux,
        Direction::Up => player.vel.y = -uy,
        Direction::Down => player.vel.y = uy,
    }
}

/// Hand a dead pooled projectile to the first shooter whose cooldown has
/// expired: reposition it there, aim it (enemy shots chase the player,
/// player shots go straight up), reset its life and charge the shooter's
/// firing_rate back up.
fn recycle_projectile(entities: &mut [Entity], idx: usize, player_pos: Vec2, input: &FrameInput) {
    let Some(shooter) = entities
        .iter()
        .position(|e| e.kind != EntityKind::Projectile && e.firing_rate <= 0.0)
    else {
        return;
    };

    let speed = compute_units(PROJECTILE_SPEED, input.elapsed_millis, input.fps);
    let shooter_pos = entities[shooter].pos;
    let vel = match entities[shooter].kind {
        EntityKind::Enemy => (player_pos - shooter_pos).normalize_or_zero() * speed,
        _ => Vec2::new(0.0, -speed),
    };

    let p = &mut entities[idx];
    p.pos = shooter_pos;
    p.vel = vel;
    p.life = PROJECTILE_LIFE;
    p.cooldown = 1.0;
    entities[shooter].firing_rate = PROJECTILE_LIFE;
}

/// Copy the nonzero texels of `tex` into the foreground, centered on `pos`,
/// silently dropping anything outside the foreground bounds.
fn blit_sprite(fg_px: &mut [u32], fg_bounds: Bounds, tex_px: &[u32], tex_bounds: Bounds, pos: Vec2) {
    let tw = tex_bounds.width as i32;
    let th = tex_bounds.height as i32;
    let fw = fg_bounds.width as i32;
    let fh = fg_bounds.height as i32;
    let origin_x = pos.x as i32 - tw / 2;
    let origin_y = pos.y as i32 - th / 2;

    for ty in 0..th {
        let y = origin_y + ty;
        if y < 0 || y >= fh {
            continue;
        }
        for tx in 0..tw {
            let x = origin_x + tx;
            if x < 0 || x >= fw {
                continue;
            }
            let color = tex_px[(ty * tw + tx) as usize];
            if color != 0 {
                fg_px[(y * fw + x) as usize] = color;
            }
        }
    }
}
