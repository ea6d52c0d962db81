//! Deterministic particle emitters
//!
//! Spawning glue above the pool: a seeded RNG, a continuous spawn rate with
//! fractional carry, and one-shot radial bursts. The same seed and call
//! sequence always produce an identical pool.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::ParticlePool;

/// Emitter tuning, part of [`Settings`](crate::Settings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Spawn point
    pub origin: Vec2,
    /// Continuous spawn rate (particles per second)
    pub rate: f32,
    /// Minimum initial speed (units per second)
    pub speed_min: f32,
    /// Maximum initial speed (units per second)
    pub speed_max: f32,
    /// Minimum lifetime (seconds)
    pub lifetime_min: f32,
    /// Maximum lifetime (seconds)
    pub lifetime_max: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            rate: 120.0,
            speed_min: 40.0,
            speed_max: 160.0,
            lifetime_min: 0.5,
            lifetime_max: 2.0,
        }
    }
}

/// Seeded radial emitter feeding a [`ParticlePool`].
#[derive(Debug, Clone)]
pub struct Emitter {
    config: EmitterConfig,
    rng: Pcg32,
    /// Fractional particles owed from previous ticks
    carry: f32,
}

impl Emitter {
    pub fn new(seed: u64, config: EmitterConfig) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            carry: 0.0,
        }
    }

    /// Spawn `rate * dt` particles, carrying the fraction to the next tick.
    ///
    /// Returns how many actually went in; the rest hit pool exhaustion and
    /// were dropped.
    pub fn tick(&mut self, pool: &mut ParticlePool, dt: f32) -> usize {
        self.carry += self.config.rate * dt;
        let due = self.carry as usize;
        self.carry -= due as f32;

        let mut spawned = 0;
        for _ in 0..due {
            if self.spawn_one(pool) {
                spawned += 1;
            }
        }
        spawned
    }

    /// One-shot radial burst of up to `count` particles.
    pub fn burst(&mut self, pool: &mut ParticlePool, count: usize) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            if self.spawn_one(pool) {
                spawned += 1;
            }
        }
        spawned
    }

    fn spawn_one(&mut self, pool: &mut ParticlePool) -> bool {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = self
            .rng
            .random_range(self.config.speed_min..=self.config.speed_max);
        let lifetime = self
            .rng
            .random_range(self.config.lifetime_min..=self.config.lifetime_max);
        let dir = Vec2::new(angle.cos(), angle.sin());
        pool.spawn(self.config.origin, dir * speed, lifetime).is_some()
    }
}
