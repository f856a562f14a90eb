use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Average frame rate over one reporting interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsReport {
    pub frames: u32,
    pub elapsed: Duration,
}

impl FpsReport {
    pub fn fps(&self) -> f32 {
        let secs = self.elapsed.as_secs_f32();
        if secs <= 0.0 { 0.0 } else { self.frames as f32 / secs }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (debugger pause, window drag, minimize)
/// does not produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,

    window_start: Instant,
    window_frames: u32,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
            window_start: now,
            window_frames: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.window_frames = self.window_frames.saturating_add(1);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Returns the frame count for the elapsed interval once `interval` has
    /// passed since the previous report, then starts a new interval.
    pub fn fps_report(&mut self, interval: Duration) -> Option<FpsReport> {
        self.fps_report_at(Instant::now(), interval)
    }

    fn fps_report_at(&mut self, now: Instant, interval: Duration) -> Option<FpsReport> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < interval {
            return None;
        }

        let report = FpsReport {
            frames: self.window_frames,
            elapsed,
        };
        self.window_start = now;
        self.window_frames = 0;
        Some(report)
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
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        assert_eq!(clock.tick_at(start + Duration::from_millis(16)).frame_index, 0);
        assert_eq!(clock.tick_at(start + Duration::from_millis(32)).frame_index, 1);
    }

    #[test]
    fn dt_is_clamped_on_both_ends() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        let start = clock.last;

        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.001).abs() < 1e-6);

        let ft = clock.tick_at(start + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn dt_passes_through_inside_clamps() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        let ft = clock.tick_at(start + Duration::from_millis(20));
        assert!((ft.dt - 0.020).abs() < 1e-6);
    }

    #[test]
    fn fps_report_waits_for_interval() {
        let mut clock = FrameClock::new();
        let start = clock.window_start;
        for i in 1..=30 {
            clock.tick_at(start + Duration::from_millis(i * 10));
        }
        assert!(clock.fps_report_at(start + Duration::from_millis(300), Duration::from_secs(1)).is_none());

        let report = clock
            .fps_report_at(start + Duration::from_secs(1), Duration::from_secs(1))
            .unwrap();
        assert_eq!(report.frames, 30);
        assert!((report.fps() - 30.0).abs() < 1e-3);

        // A new interval starts empty.
        assert!(clock.fps_report_at(start + Duration::from_secs(1), Duration::ZERO).is_some_and(|r| r.frames == 0));
    }

    #[test]
    fn zero_elapsed_reports_zero_fps() {
        let report = FpsReport { frames: 10, elapsed: Duration::ZERO };
        assert_eq!(report.fps(), 0.0);
    }
}
