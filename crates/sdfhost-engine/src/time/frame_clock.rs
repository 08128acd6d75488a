use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is passed through as measured: the compute module sees long stalls as
/// long frames. No clamping and no frame skipping.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock with an explicit baseline.
    pub fn starting_at(baseline: Instant) -> Self {
        Self {
            last: baseline,
            frame_index: 0,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Called right before the first frame so startup time is not reported as a frame.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt: Duration = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_elapsed_seconds_between_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let a = clock.tick_at(t0 + Duration::from_millis(16));
        let b = clock.tick_at(t0 + Duration::from_millis(50));

        assert!((a.dt - 0.016).abs() < 1e-9);
        assert!((b.dt - 0.034).abs() < 1e-9);
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }

    #[test]
    fn long_stalls_are_not_capped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 5.0).abs() < 1e-9);
    }

    #[test]
    fn time_going_backwards_yields_zero() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 - Duration::from_millis(10));
        assert_eq!(ft.dt, 0.0);
    }
}
