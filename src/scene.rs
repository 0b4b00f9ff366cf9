//! The scene context threaded through every per-tick call.
//!
//! Owns the arena and everything allocated from it: textures, the scrolling
//! stage, the foreground/shadow working buffers and the HUD bar, plus the
//! entity collection, RNG and light. No process-wide state anywhere; the
//! host constructs one `Scene` and drives it.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::arena::{Arena, ArenaError};
use crate::consts::LIGHT_HEIGHT;
use crate::gfx::{Bounds, ImageBuffer, cast_shadows, compose};
use crate::settings::Settings;
use crate::sim::{Entity, simulate};

pub use crate::sim::FrameInput;

pub struct Scene {
    arena: Arena,
    /// Sprite textures indexed by entity kind: player, enemy, projectile.
    textures: Vec<ImageBuffer>,
    /// Tall scroll source the stage wraps over.
    background: ImageBuffer,
    /// Per-tick scrolled copy of the background.
    stage: ImageBuffer,
    foreground: ImageBuffer,
    shadow: ImageBuffer,
    hud: ImageBuffer,
    entities: Vec<Entity>,
    rng: Pcg32,
    light: Vec3,
    scroll_offset: usize,
}

impl Scene {
    /// Allocate every buffer for the session up front. Texture load
    /// failures degrade to empty buffers, but the arena not fitting the
    /// working buffers is fatal - there is nothing to recover into.
    pub fn new(settings: &Settings) -> Result<Self, ArenaError> {
        let mut arena = Arena::new(settings.arena_capacity);
        let bounds = settings.sim_bounds();

        let textures = vec![
            ImageBuffer::load(settings.resource("player.graw"), &mut arena),
            ImageBuffer::load(settings.resource("enemy.graw"), &mut arena),
            ImageBuffer::load(settings.resource("projectile.graw"), &mut arena),
        ];

        let background = {
            let bg = ImageBuffer::load(settings.resource("bg.graw"), &mut arena);
            if !bg.bounds.is_empty()
                && (bg.bounds.width < bounds.width || bg.bounds.height < bounds.height)
            {
                log::warn!(
                    "background {}x{} smaller than stage {}x{}, ignoring it",
                    bg.bounds.width,
                    bg.bounds.height,
                    bounds.width,
                    bounds.height
                );
                ImageBuffer::empty()
            } else {
                bg
            }
        };
        let hud = ImageBuffer::load(settings.resource("bar.graw"), &mut arena);

        let stage = ImageBuffer::create(bounds, &mut arena)?;
        let foreground = ImageBuffer::create(bounds, &mut arena)?;
        let shadow = ImageBuffer::create(bounds, &mut arena)?;

        let light = Vec3::new(
            bounds.width as f32 * 0.5,
            bounds.height as f32 * 0.5,
            LIGHT_HEIGHT,
        );

        log::info!(
            "scene ready: {}x{} sim, arena {} of {} bytes granted",
            bounds.width,
            bounds.height,
            arena.used(),
            arena.capacity()
        );

        Ok(Self {
            arena,
            textures,
            background,
            stage,
            foreground,
            shadow,
            hud,
            entities: Vec::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            light,
            scroll_offset: 0,
        })
    }

    /// One full tick: scroll the background, simulate entities into the
    /// foreground, project and blur shadows, compose into `dest`. The
    /// destination is fully overwritten.
    pub fn advance(&mut self, input: &FrameInput, dest: &mut [u32], dest_bounds: Bounds) {
        if !self.background.bounds.is_empty() {
            self.stage
                .copy_rows(&mut self.arena, &self.background, self.scroll_offset);
            self.scroll_offset = self.scroll_offset.wrapping_add(1);
        }

        self.foreground.clear(&mut self.arena);
        simulate(
            &mut self.entities,
            &self.textures,
            &mut self.foreground,
            &mut self.arena,
            &mut self.rng,
            input,
        );

        self.shadow.clear(&mut self.arena);
        cast_shadows(&mut self.shadow, &self.foreground, self.light, &mut self.arena);

        compose(
            dest,
            dest_bounds,
            &self.stage,
            &self.shadow,
            &self.foreground,
            &self.hud,
            &self.arena,
        );
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn light(&self) -> Vec3 {
        self.light
    }
}
