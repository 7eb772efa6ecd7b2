use std::time::{Duration, Instant};

/// Frames per second assumed when neither the sketch nor the display gives one.
pub const FALLBACK_REFRESH_HZ: u32 = 60;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Duration of the previous frame, in seconds.
    pub dt: f32,

    /// Milliseconds since the loop started, as of the last completed frame.
    pub millis: u64,

    /// Number of completed frames.
    pub frame_count: u64,

    /// Monotonic timestamp of the last completed frame.
    pub now: Instant,
}

/// Frame clock for one loop.
///
/// `tick()` is called once per completed iteration, after presentation.
/// Elapsed milliseconds never decrease and the frame count grows by exactly
/// one per tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    target_frame: Duration,
    start: Instant,
    last: Instant,
    millis: u64,
    dt: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new(target_frame: Duration) -> Self {
        Self::starting_at(target_frame, Instant::now())
    }

    pub fn starting_at(target_frame: Duration, start: Instant) -> Self {
        Self {
            target_frame,
            start,
            last: start,
            millis: 0,
            dt: 0.0,
            frame_count: 0,
        }
    }

    /// Advances the clock and returns the new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Same as [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);
        self.dt = dt.as_secs_f32();

        let since_start = self.last.saturating_duration_since(self.start).as_millis();
        self.millis = self.millis.max(u64::try_from(since_start).unwrap_or(u64::MAX));

        self.frame_count = self.frame_count.wrapping_add(1);
        self.time()
    }

    /// Timing as of the last completed frame.
    pub fn time(&self) -> FrameTime {
        FrameTime {
            dt: self.dt,
            millis: self.millis,
            frame_count: self.frame_count,
            now: self.last,
        }
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn millis(&self) -> u64 {
        self.millis
    }

    #[inline]
    pub fn target_frame(&self) -> Duration {
        self.target_frame
    }
}

/// Target frame duration for a requested frame rate.
///
/// `fps == 0` means "match the display": the reported refresh rate is used,
/// or 60 Hz when the platform cannot report one.
pub fn target_frame_duration(fps: u32, refresh_hz: Option<u32>) -> Duration {
    let hz = if fps > 0 {
        fps
    } else {
        refresh_hz.filter(|&hz| hz > 0).unwrap_or(FALLBACK_REFRESH_HZ)
    };
    Duration::from_secs(1) / hz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_tracks_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(Duration::from_millis(16), start);
        assert_eq!(clock.frame_count(), 0);

        for i in 1..=5u64 {
            let t = clock.tick_at(start + Duration::from_millis(10 * i));
            assert_eq!(t.frame_count, i);
        }
        assert_eq!(clock.millis(), 50);
    }

    #[test]
    fn millis_never_decrease() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(Duration::from_millis(16), start);
        clock.tick_at(start + Duration::from_millis(30));
        let t = clock.tick_at(start + Duration::from_millis(10));
        assert_eq!(t.millis, 30);
        assert_eq!(t.dt, 0.0);
    }

    #[test]
    fn dt_is_time_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(Duration::from_millis(16), start);
        clock.tick_at(start + Duration::from_millis(100));
        let t = clock.tick_at(start + Duration::from_millis(350));
        assert!((t.dt - 0.25).abs() < 1e-4);
    }

    #[test]
    fn explicit_fps_wins() {
        assert_eq!(target_frame_duration(30, Some(144)), Duration::from_secs(1) / 30);
    }

    #[test]
    fn zero_fps_uses_refresh_rate() {
        assert_eq!(target_frame_duration(0, Some(144)), Duration::from_secs(1) / 144);
        assert_eq!(target_frame_duration(0, None), Duration::from_secs(1) / 60);
        assert_eq!(target_frame_duration(0, Some(0)), Duration::from_secs(1) / 60);
    }
}
