//! One-shot firework burst

use crate::buffer::ParticleBuffer;
use crate::config::FireworkConfig;
use crate::integrator::{self, PhysicsParams};
use crate::lifetime::{Lifetime, LifetimeStatus};
use yule_core::{Color, SceneRng, Vec3};
use yule_runtime::FrameTime;

/// A spherical burst of palette-colored sparks that fades out and reports
/// completion once. The owner releases it after `Completed`.
pub struct FireworkBurst {
    anchor: Vec3,
    params: PhysicsParams,
    buffer: ParticleBuffer,
    lifetime: Lifetime,
    opacity: f32,
    point_size: f32,
    light_intensity: f32,
    light_color: Color,
}

impl FireworkBurst {
    /// Create and immediately burst. Panics if `config` fails validation.
    pub fn new(anchor: Vec3, config: &FireworkConfig, rng: &mut SceneRng) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid firework config: {e}");
        }
        let mut buffer = ParticleBuffer::new(config.particle_count);
        buffer.burst(Vec3::ZERO, &config.spread(), rng);
        for i in 0..buffer.len() {
            buffer.set_color(i, rng.pick(&config.palette).to_array());
        }
        Self {
            anchor,
            params: config.physics_params(),
            buffer,
            lifetime: Lifetime::new(config.duration),
            opacity: 1.0,
            point_size: config.point_size,
            light_intensity: config.light_intensity,
            light_color: config.light_color,
        }
    }

    /// Advance one frame. Once the lifetime has run out the burst stops
    /// integrating; `Completed` is returned on exactly one tick.
    pub fn tick(&mut self, time: FrameTime) -> LifetimeStatus {
        if time.delta.is_nan() || time.delta <= 0.0 {
            return self.status();
        }
        let status = self.lifetime.advance(time.delta);
        if status == LifetimeStatus::Running {
            integrator::step(
                &mut self.buffer,
                &self.params,
                time.delta,
                self.lifetime.life_ratio(),
            );
            self.opacity = 1.0 - self.lifetime.progress();
        } else {
            self.opacity = 0.0;
        }
        status
    }

    pub fn status(&self) -> LifetimeStatus {
        if self.lifetime.is_completed() {
            LifetimeStatus::Spent
        } else {
            LifetimeStatus::Running
        }
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn elapsed(&self) -> f32 {
        self.lifetime.elapsed()
    }

    /// Linear fade: 1 at launch, 0 at expiry
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    pub fn light_color(&self) -> Color {
        self.light_color
    }
}
