//! Simulation settings
//!
//! Loaded once at startup from a JSON file in the working directory.
//! Everything here is construction-time input for the clock, pool, and
//! emitter; nothing re-reads it at runtime.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Emitter, EmitterConfig, ParticlePool, SimClock};

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Fixed simulation timestep (seconds)
    pub fixed_dt: f32,
    /// Maximum simulation ticks per rendered frame
    pub max_substeps: u32,
    /// Longest frame duration fed to the clock (seconds)
    pub frame_cap: f32,
    /// Particle pool capacity
    pub pool_capacity: usize,
    /// Emitter tuning
    pub emitter: EmitterConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            frame_cap: FRAME_CAP,
            pool_capacity: POOL_CAPACITY,
            emitter: EmitterConfig::default(),
        }
    }
}

impl Settings {
    /// Settings file, looked up in the working directory
    const SETTINGS_FILE: &'static str = "spark_sim_settings.json";

    /// Load settings from disk, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(json) = std::fs::read_to_string(Self::SETTINGS_FILE) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::SETTINGS_FILE);
                    return settings;
                }
                Err(err) => log::warn!("Ignoring malformed {}: {}", Self::SETTINGS_FILE, err),
            }
        }
        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk.
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::SETTINGS_FILE, json) {
                    log::warn!("Failed to save settings: {}", err);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {}", err),
        }
    }

    /// Build the configured clock.
    pub fn clock(&self) -> SimClock {
        SimClock::new(self.fixed_dt, self.max_substeps, self.frame_cap)
    }

    /// Build the configured pool.
    pub fn pool(&self) -> ParticlePool {
        ParticlePool::new(self.pool_capacity)
    }

    /// Build the configured emitter.
    pub fn emitter(&self, seed: u64) -> Emitter {
        Emitter::new(seed, self.emitter.clone())
    }
}
