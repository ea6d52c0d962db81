//! Spark Sim entry point
//!
//! Headless driver demonstrating the host-loop contract: feed per-frame
//! elapsed time to the clock, step the emitter and pool inside the clock's
//! callback, then read back the interpolated view where a renderer would
//! draw it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use spark_sim::Settings;

/// Frames simulated by the demo run
const DEMO_FRAMES: u32 = 600;
/// Frame at which the demo injects a long stall to exercise the substep cap
const STALL_FRAME: u32 = 300;

fn main() {
    env_logger::init();
    log::info!("spark-sim (headless) starting...");

    let settings = Settings::load();
    let mut clock = settings.clock();
    let mut pool = settings.pool();

    let seed = 0xC0FFEE;
    let mut emitter = settings.emitter(seed);
    let mut frame_rng = Pcg32::seed_from_u64(seed ^ 0x9E3779B97F4A7C15);

    let step_dt = settings.fixed_dt;
    let mut spawned_total = 0usize;
    let mut saturated_frames = 0u32;

    for frame in 0..DEMO_FRAMES {
        // ~60 Hz with jitter, plus one injected stall
        let frame_dt = if frame == STALL_FRAME {
            log::info!("frame {frame}: injecting 0.5s stall");
            0.5
        } else {
            frame_rng.random_range(0.012..0.021)
        };

        let ticks = clock.advance(frame_dt, || {
            spawned_total += emitter.tick(&mut pool, step_dt);
            pool.update(step_dt);
        });
        if ticks == settings.max_substeps {
            saturated_frames += 1;
        }

        // Stand-in for rendering: walk the interpolated view
        let alpha = clock.alpha();
        let visible = pool.particles(alpha).count();
        log::debug!(
            "frame {frame}: dt={frame_dt:.4} ticks={ticks} alpha={alpha:.2} visible={visible}"
        );
    }

    log::info!(
        "done: {} ticks over {} frames, {} particles spawned, {}/{} slots live, {} saturated frames",
        clock.ticks(),
        DEMO_FRAMES,
        spawned_total,
        pool.active_count(),
        pool.capacity(),
        saturated_frames
    );
}
