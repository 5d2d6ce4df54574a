//! Bounded effect lifetime with a single completion report

/// Outcome of advancing a `Lifetime`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeStatus {
    /// Still within `max_duration`
    Running,
    /// Crossed `max_duration` on this advance. Reported exactly once.
    Completed,
    /// Already completed on an earlier advance
    Spent,
}

/// Elapsed-time tracker for one effect instance
#[derive(Debug, Clone, PartialEq)]
pub struct Lifetime {
    elapsed: f32,
    max_duration: f32,
    completed: bool,
}

impl Lifetime {
    /// Panics unless `max_duration` is positive and finite.
    pub fn new(max_duration: f32) -> Self {
        assert!(
            max_duration.is_finite() && max_duration > 0.0,
            "effect duration must be positive, got {max_duration}"
        );
        Self {
            elapsed: 0.0,
            max_duration,
            completed: false,
        }
    }

    /// Accumulate `delta` and report whether this crossed the expiry.
    /// An instance is expired once `elapsed > max_duration`.
    pub fn advance(&mut self, delta: f32) -> LifetimeStatus {
        if self.completed {
            return LifetimeStatus::Spent;
        }
        self.elapsed += delta.max(0.0);
        if self.elapsed > self.max_duration {
            self.completed = true;
            LifetimeStatus::Completed
        } else {
            LifetimeStatus::Running
        }
    }

    /// Start over from zero (reusable effects)
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.completed = false;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn max_duration(&self) -> f32 {
        self.max_duration
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `elapsed / max_duration`, capped at 1
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.max_duration).min(1.0)
    }

    /// Remaining fraction of the lifetime, in [0, 1]
    pub fn life_ratio(&self) -> f32 {
        crate::integrator::life_ratio(self.elapsed, self.max_duration)
    }
}
