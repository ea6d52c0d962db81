//! Spark Sim - a fixed-timestep particle simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed-step clock, bounded particle
//!   pool, seeded emitters)
//! - `settings`: Startup configuration with JSON persistence
//!
//! The crate is the computational core only. The owning application loop
//! feeds per-frame elapsed time into [`SimClock::advance`] with a callback
//! that steps the simulation, then renders from
//! [`ParticlePool::particles`] using [`SimClock::alpha`]. `src/main.rs` is
//! a headless driver wiring the two together.

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Emitter, EmitterConfig, ParticleInstance, ParticlePool, SimClock};

/// Default tuning constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame duration fed to the clock (seconds)
    pub const FRAME_CAP: f32 = 0.10;
    /// Default particle pool capacity
    pub const POOL_CAPACITY: usize = 256;
}
