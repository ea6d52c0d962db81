//! Fixed timestep clock
//!
//! Decouples rendering frame rate from simulation rate: irregular frame
//! durations are folded into an accumulator and drained as whole fixed-size
//! ticks, with a hard cap on ticks per frame so a stalled frame can never
//! snowball into an ever-growing backlog.

/// Accumulator-based fixed timestep clock.
///
/// Created once at startup with its three constants; mutated only by
/// [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Duration of one simulation tick (seconds)
    fixed_dt: f32,
    /// Upper bound on ticks executed in a single `advance` call
    max_substeps: u32,
    /// Longest frame duration accepted in one `advance` call (seconds)
    frame_cap: f32,
    /// Leftover unsimulated time
    accumulator: f32,
    /// Total ticks executed since construction
    ticks: u64,
}

impl SimClock {
    pub fn new(fixed_dt: f32, max_substeps: u32, frame_cap: f32) -> Self {
        assert!(fixed_dt > 0.0, "fixed_dt must be positive");
        assert!(max_substeps >= 1, "max_substeps must be at least 1");
        assert!(frame_cap > 0.0, "frame_cap must be positive");
        Self {
            fixed_dt,
            max_substeps,
            frame_cap,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Fold `frame_dt` seconds of real time into the accumulator and run
    /// `step` once per whole fixed tick drained from it.
    ///
    /// `frame_dt` is clamped to `[0, frame_cap]` before accumulating. If the
    /// substep cap is hit with a full tick still pending, the remainder is
    /// discarded and the next frame starts fresh: the simulation skips time
    /// rather than going slow-motion or stalling.
    ///
    /// Returns the number of ticks executed.
    pub fn advance<F: FnMut()>(&mut self, frame_dt: f32, mut step: F) -> u32 {
        let dt = frame_dt.clamp(0.0, self.frame_cap);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.fixed_dt && substeps < self.max_substeps {
            step();
            self.accumulator -= self.fixed_dt;
            substeps += 1;
        }
        self.ticks += u64::from(substeps);

        if substeps == self.max_substeps && self.accumulator >= self.fixed_dt {
            log::warn!(
                "simulation saturated: dropping {:.3}s of accumulated time",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// How far real time sits between the last completed tick and the next
    /// one, in `[0, 1]`. Blend previous/current positions with this for
    /// smooth rendering between ticks.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.fixed_dt).clamp(0.0, 1.0)
    }

    /// The fixed tick duration (seconds).
    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Total ticks executed since construction.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
