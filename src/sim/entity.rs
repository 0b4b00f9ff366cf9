//! Entity records and the deterministic spawn batch.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{CLIP_MARGIN, ENEMY_COUNT, PROJECTILE_POOL};
use crate::gfx::Bounds;

/// Entity type tag; doubles as the sprite texture index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player = 0,
    Enemy = 1,
    Projectile = 2,
}

impl EntityKind {
    pub fn texture_index(self) -> usize {
        self as usize
    }
}

/// One simulated entity. Records are created once per session and persist
/// for the whole run; `life <= 0` marks death and is resolved by in-place
/// respawn, never by removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub firing_rate: f32,
    pub cooldown: f32,
    pub kind: EntityKind,
}

impl Entity {
    fn new(kind: EntityKind, pos: Vec2, life: f32, firing_rate: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            life,
            firing_rate,
            cooldown: 0.0,
            kind,
        }
    }
}

/// The inset rectangle every entity is clamped into after integration.
#[derive(Debug, Clone, Copy)]
pub struct ClipRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ClipRect {
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self {
            min: Vec2::splat(CLIP_MARGIN),
            max: Vec2::new(
                bounds.width as f32 - CLIP_MARGIN,
                bounds.height as f32 - CLIP_MARGIN,
            ),
        }
    }

    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(self.min, self.max)
    }

    pub fn random_point(&self, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(self.random_x(rng), rng.random_range(self.min.y..self.max.y))
    }

    pub fn random_x(&self, rng: &mut Pcg32) -> f32 {
        rng.random_range(self.min.x..self.max.x)
    }
}

/// Build the session's entity batch: enemies, the pooled projectiles
/// (inactive until recycled), and the player last, centered.
pub fn spawn_batch(rng: &mut Pcg32, clip: &ClipRect, bounds: Bounds) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(ENEMY_COUNT + PROJECTILE_POOL + 1);

    for _ in 0..ENEMY_COUNT {
        entities.push(Entity::new(EntityKind::Enemy, clip.random_point(rng), 1.0, 1.0));
    }
    for _ in 0..PROJECTILE_POOL {
        entities.push(Entity::new(EntityKind::Projectile, clip.random_point(rng), 0.0, 0.0));
    }

    let center = Vec2::new(bounds.width as f32 / 2.0, bounds.height as f32 / 2.0);
    entities.push(Entity::new(EntityKind::Player, center, 1.0, 3.0));

    entities
}
