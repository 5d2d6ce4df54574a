//! Re-triggerable campfire flare

use crate::buffer::ParticleBuffer;
use crate::config::FlareConfig;
use crate::integrator::{self, PhysicsParams};
use crate::lifetime::{Lifetime, LifetimeStatus};
use yule_core::{SceneRng, Vec3};
use yule_runtime::FrameTime;

/// What a flare did during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlareStatus {
    /// Not flaring; particles hidden, light flickering at rest
    Idle,
    /// Particles in flight
    Active,
    /// Burned out on this tick and returned to idle
    Expired,
}

/// A flare bolted to a campfire.
///
/// Unlike a firework the flare is never destroyed: `ignite` restarts it at
/// any time, and it falls back to idle on its own once `duration` passes.
pub struct FlareEffect {
    anchor: Vec3,
    config: FlareConfig,
    params: PhysicsParams,
    buffer: ParticleBuffer,
    lifetime: Lifetime,
    active: bool,
    light_intensity: f32,
}

impl FlareEffect {
    /// Panics if `config` fails validation.
    pub fn new(anchor: Vec3, config: FlareConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid flare config: {e}");
        }
        let buffer = ParticleBuffer::new(config.particle_count);
        let lifetime = Lifetime::new(config.duration);
        let params = config.physics_params();
        let light_intensity = config.light_base;
        Self {
            anchor,
            config,
            params,
            buffer,
            lifetime,
            active: false,
            light_intensity,
        }
    }

    /// Start (or restart) the flare: reset the timer and burst every particle
    /// from the base of the fire.
    pub fn ignite(&mut self, rng: &mut SceneRng) {
        self.lifetime.reset();
        self.active = true;
        self.buffer.burst(Vec3::ZERO, &self.config.spread, rng);
        let white = integrator::flare_color(1.0, self.config.white_threshold);
        self.buffer.fill_colors(white);
        log::debug!(
            "[particles] Flare at {:?} ignited ({} particles)",
            self.anchor,
            self.buffer.len()
        );
    }

    /// Advance one frame. A zero or NaN delta changes nothing.
    pub fn tick(&mut self, time: FrameTime) -> FlareStatus {
        if time.delta.is_nan() || time.delta <= 0.0 {
            return if self.active {
                FlareStatus::Active
            } else {
                FlareStatus::Idle
            };
        }

        let t = time.elapsed_f32();
        if !self.active {
            self.buffer.zero_colors();
            self.light_intensity = self.idle_light(t);
            return FlareStatus::Idle;
        }

        match self.lifetime.advance(time.delta) {
            LifetimeStatus::Running => {
                integrator::step(
                    &mut self.buffer,
                    &self.params,
                    time.delta,
                    self.lifetime.life_ratio(),
                );
                let flash = self.config.light_flash
                    * (1.0 - self.lifetime.elapsed() * self.config.light_flash_decay).max(0.0);
                self.light_intensity =
                    self.config.light_base + flash + (t * 20.0).sin() * self.config.light_flicker;
                FlareStatus::Active
            }
            LifetimeStatus::Completed | LifetimeStatus::Spent => {
                self.active = false;
                self.lifetime.reset();
                self.buffer.zero_colors();
                self.light_intensity = self.idle_light(t);
                FlareStatus::Expired
            }
        }
    }

    fn idle_light(&self, t: f32) -> f32 {
        self.config.light_base
            + (t * 10.0).sin() * self.config.light_flicker
            + (t * 23.0).cos() * self.config.light_flicker
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Seconds since the last ignition (0 while idle)
    pub fn elapsed(&self) -> f32 {
        self.lifetime.elapsed()
    }

    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    pub fn point_size(&self) -> f32 {
        self.config.point_size
    }
}
