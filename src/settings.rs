//! Run configuration.
//!
//! Everything has a sensible default; an optional JSON file can override
//! any subset of fields. A bad or missing file is logged and ignored -
//! configuration is never a reason not to start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::gfx::Bounds;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation-side resolution; all sim buffers share it.
    pub sim_width: u32,
    pub sim_height: u32,
    /// Device/output resolution the composer targets.
    pub dest_width: u32,
    pub dest_height: u32,
    /// Arena capacity in bytes; every texture and buffer must fit.
    pub arena_capacity: usize,
    /// Session RNG seed.
    pub seed: u64,
    /// Directory holding the .graw texture resources.
    pub resource_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim_width: consts::SIM_WIDTH,
            sim_height: consts::SIM_HEIGHT,
            dest_width: 1024,
            dest_height: 768,
            arena_capacity: consts::ARENA_CAPACITY,
            seed: consts::DEFAULT_SEED,
            resource_dir: PathBuf::from("res"),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file, falling back to defaults on any
    /// failure (logged, never fatal).
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("bad settings file {}: {err}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("cannot read settings {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn sim_bounds(&self) -> Bounds {
        Bounds::new(self.sim_width, self.sim_height)
    }

    pub fn dest_bounds(&self) -> Bounds {
        Bounds::new(self.dest_width, self.dest_height)
    }

    /// Path of a named texture resource.
    pub fn resource(&self, name: &str) -> PathBuf {
        self.resource_dir.join(name)
    }
}
