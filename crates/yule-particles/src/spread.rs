//! Burst spread policies: how a burst places and launches each particle

use yule_core::{SceneRng, Vec3};

/// Rule generating a particle's initial offset and velocity on burst.
///
/// Velocities are in distance-per-tick units (see `GravityMode`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpreadPolicy {
    /// Ground-level fountain: random azimuth, bounded horizontal jitter,
    /// fixed upward bias.
    Cone {
        /// Max horizontal distance of the spawn point from the origin
        horizontal_jitter: f32,
        /// Spawn height above the origin
        base_height: f32,
        /// Extra random spawn height in [0, height_jitter)
        height_jitter: f32,
        /// Max horizontal launch speed
        horizontal_speed: f32,
        /// Upward launch speed range
        upward_min: f32,
        upward_max: f32,
    },
    /// Airborne burst: uniform spherical direction, scalar speed in range.
    Sphere { speed_min: f32, speed_max: f32 },
}

impl SpreadPolicy {
    /// Campfire flare fountain
    pub fn flare_default() -> Self {
        SpreadPolicy::Cone {
            horizontal_jitter: 0.15,
            base_height: 0.2,
            height_jitter: 0.2,
            horizontal_speed: 0.075,
            upward_min: 0.15,
            upward_max: 0.4,
        }
    }

    /// Firework shell
    pub fn firework_default() -> Self {
        SpreadPolicy::Sphere {
            speed_min: 0.1,
            speed_max: 0.3,
        }
    }

    /// Draw one particle's (offset, velocity)
    pub fn sample(&self, rng: &mut SceneRng) -> (Vec3, Vec3) {
        match *self {
            SpreadPolicy::Cone {
                horizontal_jitter,
                base_height,
                height_jitter,
                horizontal_speed,
                upward_min,
                upward_max,
            } => {
                let spawn_angle = rng.angle();
                let spawn_radius = rng.range(0.0, horizontal_jitter);
                let offset = Vec3::new(
                    spawn_angle.cos() * spawn_radius,
                    base_height + rng.range(0.0, height_jitter),
                    spawn_angle.sin() * spawn_radius,
                );

                let launch_angle = rng.angle();
                let launch_speed = rng.range(0.0, horizontal_speed);
                let velocity = Vec3::new(
                    launch_angle.cos() * launch_speed,
                    rng.range(upward_min, upward_max),
                    launch_angle.sin() * launch_speed,
                );
                (offset, velocity)
            }
            SpreadPolicy::Sphere {
                speed_min,
                speed_max,
            } => {
                let dir = Vec3::from_array(rng.random_direction());
                let speed = rng.range(speed_min, speed_max);
                (Vec3::ZERO, dir * speed)
            }
        }
    }

    /// Whether `offset` (relative to the burst origin) lies inside this
    /// policy's spawn region
    pub fn contains_offset(&self, offset: Vec3) -> bool {
        const EPS: f32 = 1e-5;
        match *self {
            SpreadPolicy::Cone {
                horizontal_jitter,
                base_height,
                height_jitter,
                ..
            } => {
                offset.horizontal_length() <= horizontal_jitter + EPS
                    && offset.y >= base_height - EPS
                    && offset.y <= base_height + height_jitter + EPS
            }
            SpreadPolicy::Sphere { .. } => offset.length() <= EPS,
        }
    }

    /// Whether `velocity` is one this policy can produce
    pub fn contains_velocity(&self, velocity: Vec3) -> bool {
        const EPS: f32 = 1e-5;
        match *self {
            SpreadPolicy::Cone {
                horizontal_speed,
                upward_min,
                upward_max,
                ..
            } => {
                velocity.horizontal_length() <= horizontal_speed + EPS
                    && velocity.y >= upward_min - EPS
                    && velocity.y <= upward_max + EPS
            }
            SpreadPolicy::Sphere {
                speed_min,
                speed_max,
            } => {
                let speed = velocity.length();
                speed >= speed_min - EPS && speed <= speed_max + EPS
            }
        }
    }
}
