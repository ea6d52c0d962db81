//! Bounded particle pool
//!
//! A fixed-capacity arena of particle slots stored as parallel arrays
//! (structure-of-arrays), with a LIFO free stack of unused slot indices.
//! Spawn and reclamation are O(1) and allocation-free; the per-tick update
//! is a linear scan over contiguous per-attribute arrays.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Render-ready snapshot of one live particle.
///
/// `#[repr(C)]` and `Pod` so a host renderer can copy a collected view
/// straight into a GPU instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Position blended between the previous and current tick
    pub pos: Vec2,
    /// Remaining lifetime fraction: 1 at spawn, 0 at expiry
    pub fade: f32,
}

/// Fixed-capacity pool of particle slots.
///
/// A slot is live iff its remaining `life` is positive. [`spawn`](Self::spawn)
/// pops the free stack; expiry inside [`update`](Self::update) pushes the
/// slot back. The most recently freed slot is the next one handed out
/// (LIFO), keeping recently touched array entries warm; reuse order is
/// deliberately not FIFO.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    pos_x: Vec<f32>,
    pos_y: Vec<f32>,
    prev_x: Vec<f32>,
    prev_y: Vec<f32>,
    vel_x: Vec<f32>,
    vel_y: Vec<f32>,
    life: Vec<f32>,
    life_max: Vec<f32>,
    /// Indices of slots not currently live; top of stack spawns next
    free: Vec<usize>,
}

impl ParticlePool {
    /// Create a pool with every slot free.
    pub fn new(capacity: usize) -> Self {
        Self {
            pos_x: vec![0.0; capacity],
            pos_y: vec![0.0; capacity],
            prev_x: vec![0.0; capacity],
            prev_y: vec![0.0; capacity],
            vel_x: vec![0.0; capacity],
            vel_y: vec![0.0; capacity],
            life: vec![0.0; capacity],
            life_max: vec![0.0; capacity],
            // Reversed so a fresh pool hands out slots 0, 1, 2, ..
            free: (0..capacity).rev().collect(),
        }
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.life.len()
    }

    /// Number of live slots.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.capacity() - self.free.len()
    }

    /// Number of slots available to spawn into.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Claim a free slot, or `None` when the pool is exhausted.
    ///
    /// Exhaustion is an expected steady-state condition under load, not an
    /// error: the request is dropped and nothing changes. `prev` starts
    /// equal to `pos` so the first rendered frame interpolates to the spawn
    /// point instead of streaking from a stale position.
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, lifetime: f32) -> Option<usize> {
        assert!(lifetime > 0.0, "particle lifetime must be positive");
        let id = self.free.pop()?;
        self.pos_x[id] = pos.x;
        self.pos_y[id] = pos.y;
        self.prev_x[id] = pos.x;
        self.prev_y[id] = pos.y;
        self.vel_x[id] = vel.x;
        self.vel_y[id] = vel.y;
        self.life[id] = lifetime;
        self.life_max[id] = lifetime;
        Some(id)
    }

    /// Advance every live particle by `dt` seconds.
    ///
    /// Scans all slots, dead ones included; skipping a dead slot is one
    /// predictable branch over contiguous arrays. A particle whose life
    /// crosses zero has it clamped to 0 and its slot pushed back on the
    /// free stack before the call returns.
    ///
    /// Drive this with the clock's fixed tick duration, exactly once per
    /// tick. Lifetime decay is only deterministic across runs under that
    /// discipline.
    pub fn update(&mut self, dt: f32) {
        for id in 0..self.life.len() {
            if self.life[id] <= 0.0 {
                continue;
            }
            self.prev_x[id] = self.pos_x[id];
            self.prev_y[id] = self.pos_y[id];
            self.pos_x[id] += self.vel_x[id] * dt;
            self.pos_y[id] += self.vel_y[id] * dt;
            self.life[id] -= dt;
            if self.life[id] <= 0.0 {
                self.life[id] = 0.0;
                self.free.push(id);
            }
        }
    }

    /// Lazy read-only view of the live particles, positions blended by
    /// `alpha` from [`SimClock::alpha`](crate::sim::SimClock::alpha).
    ///
    /// Safe to walk any number of times between updates; nothing else
    /// mutates the pool in the meantime.
    pub fn particles(&self, alpha: f32) -> impl Iterator<Item = ParticleInstance> + '_ {
        (0..self.life.len()).filter_map(move |id| {
            let life = self.life[id];
            let life_max = self.life_max[id];
            // life_max <= 0 is unreachable through spawn; treat as expired
            if life <= 0.0 || life_max <= 0.0 {
                return None;
            }
            let prev = Vec2::new(self.prev_x[id], self.prev_y[id]);
            let pos = Vec2::new(self.pos_x[id], self.pos_y[id]);
            Some(ParticleInstance {
                pos: prev + (pos - prev) * alpha,
                fade: life / life_max,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_assigns_slots_in_order() {
        let mut pool = ParticlePool::new(3);
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 1.0), Some(0));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 1.0), Some(1));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 1.0), Some(2));
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn test_exhaustion_drops_request() {
        let mut pool = ParticlePool::new(2);
        pool.spawn(Vec2::new(1.0, 0.0), Vec2::ZERO, 1.0).unwrap();
        pool.spawn(Vec2::new(2.0, 0.0), Vec2::ZERO, 1.0).unwrap();

        let before: Vec<_> = pool.particles(0.0).collect();
        assert_eq!(pool.spawn(Vec2::new(9.0, 9.0), Vec2::ZERO, 1.0), None);
        let after: Vec<_> = pool.particles(0.0).collect();

        // The failed spawn left the two live slots untouched
        assert_eq!(before, after);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_lifo_reuse_of_freed_slot() {
        let mut pool = ParticlePool::new(2);
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 0.5), Some(0));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 2.0), Some(1));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 1.0), None);

        // Expires slot 0, leaves slot 1 alive
        pool.update(1.0);
        assert_eq!(pool.active_count(), 1);

        // Most recently freed slot is reused first
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::ZERO, 1.0), Some(0));
    }

    #[test]
    fn test_update_integrates_and_interpolates() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(Vec2::ZERO, Vec2::new(8.0, 0.0), 1.0).unwrap();
        pool.update(0.25);

        let p: Vec<_> = pool.particles(0.5).collect();
        assert_eq!(p.len(), 1);
        // Halfway between prev (0, 0) and pos (2, 0)
        assert_eq!(p[0].pos, Vec2::new(1.0, 0.0));
        assert_eq!(p[0].fade, 0.75);
    }

    #[test]
    fn test_spawn_has_no_first_frame_streak() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(Vec2::new(3.0, -2.0), Vec2::new(100.0, 100.0), 1.0)
            .unwrap();

        // prev == pos until the first update, so any alpha lands on the
        // spawn point
        let p: Vec<_> = pool.particles(0.9).collect();
        assert_eq!(p[0].pos, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_zero_dt_update_is_positionally_idempotent() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(Vec2::new(1.0, 2.0), Vec2::new(4.0, 4.0), 1.0)
            .unwrap();
        pool.update(0.25);
        assert_eq!(pool.pos_x[0], 2.0);
        assert_eq!(pool.prev_x[0], 1.0);

        pool.update(0.0);
        // Position and life unchanged, prev snapped onto pos
        assert_eq!(pool.pos_x[0], 2.0);
        assert_eq!(pool.prev_x[0], 2.0);
        assert_eq!(pool.life[0], 0.75);

        // Interpolation is a no-op this frame
        let p: Vec<_> = pool.particles(0.7).collect();
        assert_eq!(p[0].pos, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_lifetime_expires_exactly_at_zero() {
        let mut pool = ParticlePool::new(2);
        pool.spawn(Vec2::ZERO, Vec2::ZERO, 1.0).unwrap();

        pool.update(0.5);
        assert_eq!(pool.active_count(), 1);

        pool.update(0.5);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.life[0], 0.0);
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.particles(0.0).count(), 0);
    }

    #[test]
    fn test_update_skips_dead_slots() {
        let mut pool = ParticlePool::new(2);
        pool.spawn(Vec2::ZERO, Vec2::new(8.0, 0.0), 0.25).unwrap();
        pool.update(0.25);
        assert_eq!(pool.active_count(), 0);
        let resting = pool.pos_x[0];

        // Dead slot does not keep integrating
        pool.update(0.25);
        assert_eq!(pool.pos_x[0], resting);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_zero_life_max_treated_as_expired() {
        // Unreachable through spawn, but the view must not divide by zero
        let mut pool = ParticlePool::new(1);
        pool.life[0] = 1.0;
        pool.life_max[0] = 0.0;
        assert_eq!(pool.particles(0.0).count(), 0);
    }

    proptest! {
        #[test]
        fn test_free_active_partition_invariant(
            ops in proptest::collection::vec((0u8..2, 0.05f32..1.5), 1..128),
        ) {
            let mut pool = ParticlePool::new(8);
            for (op, x) in ops {
                match op {
                    0 => {
                        let _ = pool.spawn(Vec2::ZERO, Vec2::ONE, x);
                    }
                    _ => pool.update(x),
                }

                // Every id is in exactly one of {free, live}
                let live = pool.life.iter().filter(|&&l| l > 0.0).count();
                prop_assert_eq!(live, pool.active_count());

                let mut seen = std::collections::HashSet::new();
                for &id in &pool.free {
                    prop_assert!(id < pool.capacity());
                    prop_assert!(seen.insert(id), "duplicate id in free stack");
                    prop_assert!(pool.life[id] <= 0.0);
                }
            }
        }
    }
}
