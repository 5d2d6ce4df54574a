//! Frame clock: monotonic elapsed time plus a per-frame delta

use std::time::Instant;

/// The two scalars every simulated component derives its behavior from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since scene start
    pub elapsed: f64,
    /// Seconds since the previous frame (never negative)
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f64, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// Elapsed time narrowed for trigonometric animation terms
    pub fn elapsed_f32(&self) -> f32 {
        self.elapsed as f32
    }
}

/// Tracks scene time. Driven either explicitly by the host (`advance`) or
/// from the wall clock (`tick`).
pub struct FrameClock {
    /// Total elapsed time in seconds
    elapsed: f64,
    /// Time since last frame in seconds
    delta: f64,
    /// Optional upper bound applied to every delta (host choice; off by default)
    max_delta: Option<f64>,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first real-time tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            max_delta: None,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock that clamps stalled frames to `max_delta` seconds
    pub fn with_max_delta(max_delta: f64) -> Self {
        assert!(max_delta > 0.0, "max_delta must be positive");
        Self {
            max_delta: Some(max_delta),
            ..Self::default()
        }
    }

    /// Advance by a host-supplied delta. Negative or NaN deltas count as zero.
    pub fn advance(&mut self, delta: f64) -> FrameTime {
        let mut delta = if delta.is_nan() { 0.0 } else { delta.max(0.0) };
        if let Some(max) = self.max_delta {
            delta = delta.min(max);
        }
        self.delta = delta;
        self.elapsed += delta;
        self.frame_time()
    }

    /// Advance from the wall clock. Call once per frame; the first call yields
    /// a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta = 0.0;
            return self.frame_time();
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Seconds since scene start
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    /// Delta of the most recent tick
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.elapsed, self.delta as f32)
    }
}
