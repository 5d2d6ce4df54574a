//! Physics integrator: gravity, drag, color-by-age and ground clamp
//!
//! `step` is a pure function of the buffer, the parameters and the frame
//! delta. It keeps no state of its own and allocates nothing.

use crate::buffer::ParticleBuffer;

/// How gravity, velocity and drag relate to the frame delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravityMode {
    /// One fixed increment per tick regardless of delta. Velocities are in
    /// distance-per-tick; motion speed follows the frame rate.
    PerTick,
    /// Increments scaled by `delta * reference_hz`, so motion matches
    /// `PerTick` at `reference_hz` and stays frame-rate independent.
    Scaled { reference_hz: f32 },
}

impl GravityMode {
    /// Number of reference ticks this frame represents
    pub fn tick_factor(&self, delta: f32) -> f32 {
        match *self {
            GravityMode::PerTick => 1.0,
            GravityMode::Scaled { reference_hz } => delta.max(0.0) * reference_hz,
        }
    }
}

/// Per-particle color rule applied every step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorRamp {
    /// Leave colors as the effect set them
    Keep,
    /// Near-white while the life ratio is above `white_threshold`, then
    /// white-to-orange as the ratio falls toward zero
    Flare { white_threshold: f32 },
}

impl ColorRamp {
    pub fn color_for(&self, life_ratio: f32) -> Option<[f32; 3]> {
        match *self {
            ColorRamp::Keep => None,
            ColorRamp::Flare { white_threshold } => Some(flare_color(life_ratio, white_threshold)),
        }
    }
}

/// Flare color for a life ratio in [0, 1]
pub fn flare_color(life_ratio: f32, white_threshold: f32) -> [f32; 3] {
    let ratio = life_ratio.clamp(0.0, 1.0);
    if ratio > white_threshold {
        [1.0, 1.0, 0.8]
    } else {
        [1.0, 0.3 + ratio * 0.4, 0.0]
    }
}

/// Normalized remaining lifetime: `max(0, 1 - elapsed / lifetime)`
pub fn life_ratio(elapsed: f32, lifetime: f32) -> f32 {
    (1.0 - elapsed / lifetime).max(0.0)
}

/// Integration parameters for one effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// Downward velocity change per reference tick
    pub gravity: f32,
    /// Per-tick velocity multiplier, in (0, 1]
    pub drag: f32,
    /// Whether drag also damps the vertical component
    pub drag_vertical: bool,
    /// Clamp particles at local y = 0 and hide them on contact
    pub ground_clamp: bool,
    pub gravity_mode: GravityMode,
    pub color_ramp: ColorRamp,
}

/// Advance every row of `buffer` by one frame.
///
/// Per row, in order: integrate position (explicit Euler, no sub-steps),
/// apply gravity, apply drag, recompute color from `life_ratio`, then the
/// optional ground clamp. A row resting on the ground stays at y = 0 with
/// zero vertical velocity and a zero color.
pub fn step(buffer: &mut ParticleBuffer, params: &PhysicsParams, delta: f32, life_ratio: f32) {
    let k = params.gravity_mode.tick_factor(delta);
    let drag = if k == 1.0 {
        params.drag
    } else {
        params.drag.powf(k)
    };
    let ramp_color = params.color_ramp.color_for(life_ratio);

    for (pos, vel, color) in buffer.rows_mut() {
        pos[0] += vel[0] * k;
        pos[1] += vel[1] * k;
        pos[2] += vel[2] * k;

        vel[1] -= params.gravity * k;

        vel[0] *= drag;
        vel[2] *= drag;
        if params.drag_vertical {
            vel[1] *= drag;
        }

        if let Some(c) = ramp_color {
            *color = c;
        }

        if params.ground_clamp && pos[1] <= 0.0 {
            pos[1] = 0.0;
            vel[1] = 0.0;
            *color = [0.0; 3];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spread::SpreadPolicy;
    use yule_core::{SceneRng, Vec3};

    fn flare_params() -> PhysicsParams {
        PhysicsParams {
            gravity: 0.008,
            drag: 0.98,
            drag_vertical: false,
            ground_clamp: true,
            gravity_mode: GravityMode::PerTick,
            color_ramp: ColorRamp::Flare {
                white_threshold: 0.8,
            },
        }
    }

    fn single_row(pos: [f32; 3], vel: [f32; 3]) -> ParticleBuffer {
        let mut buffer = ParticleBuffer::new(1);
        for (p, v, c) in buffer.rows_mut() {
            *p = pos;
            *v = vel;
            *c = [1.0; 3];
        }
        buffer
    }

    #[test]
    fn step_order_matches_euler_then_gravity_then_drag() {
        let mut buffer = single_row([0.0, 1.0, 0.0], [0.1, 0.2, -0.1]);
        step(&mut buffer, &flare_params(), 1.0 / 60.0, 1.0);

        let p = buffer.positions()[0];
        let v = buffer.velocities()[0];
        assert!((p[0] - 0.1).abs() < 1e-6);
        assert!((p[1] - 1.2).abs() < 1e-6);
        assert!((v[0] - 0.098).abs() < 1e-6);
        // Vertical drag is off for the flare
        assert!((v[1] - 0.192).abs() < 1e-6);
        assert!((v[2] + 0.098).abs() < 1e-6);
    }

    #[test]
    fn vertical_drag_applies_when_enabled() {
        let mut params = flare_params();
        params.drag_vertical = true;
        params.ground_clamp = false;
        let mut buffer = single_row([0.0, 5.0, 0.0], [0.0, 0.2, 0.0]);
        step(&mut buffer, &params, 1.0 / 60.0, 1.0);
        assert!((buffer.velocities()[0][1] - (0.2 - 0.008) * 0.98).abs() < 1e-6);
    }

    #[test]
    fn ground_clamp_is_idempotent() {
        let mut buffer = single_row([0.0, 0.05, 0.0], [0.02, -0.1, 0.0]);
        let params = flare_params();
        step(&mut buffer, &params, 1.0 / 60.0, 0.5);
        assert_eq!(buffer.positions()[0][1], 0.0);
        assert_eq!(buffer.velocities()[0][1], 0.0);
        assert!(!buffer.is_lit(0));

        for _ in 0..50 {
            step(&mut buffer, &params, 1.0 / 60.0, 0.5);
            assert_eq!(buffer.positions()[0][1], 0.0);
            assert_eq!(buffer.velocities()[0][1], 0.0);
            assert!(!buffer.is_lit(0));
        }
    }

    #[test]
    fn length_never_changes() {
        let mut rng = SceneRng::new(5);
        let mut buffer = ParticleBuffer::new(150);
        buffer.burst(Vec3::ZERO, &SpreadPolicy::flare_default(), &mut rng);
        for i in 0..300 {
            step(&mut buffer, &flare_params(), 1.0 / 60.0, life_ratio(i as f32 / 60.0, 2.0));
            assert_eq!(buffer.len(), 150);
        }
    }

    #[test]
    fn flare_color_is_monotonic_over_life() {
        let mut last = flare_color(1.0, 0.8);
        let steps = 200;
        for i in 1..=steps {
            let elapsed = 2.0 * i as f32 / steps as f32;
            let c = flare_color(life_ratio(elapsed, 2.0), 0.8);
            for ch in 0..3 {
                assert!(c[ch] <= last[ch] + 1e-6, "channel {ch} reversed at {elapsed}");
            }
            last = c;
        }
        assert_eq!(last, [1.0, 0.3, 0.0]);
    }

    #[test]
    fn keep_ramp_preserves_palette() {
        let mut params = flare_params();
        params.color_ramp = ColorRamp::Keep;
        params.ground_clamp = false;
        let mut buffer = single_row([0.0, 1.0, 0.0], [0.0, 0.0, 0.0]);
        buffer.set_color(0, [0.0, 1.0, 1.0]);
        step(&mut buffer, &params, 1.0 / 60.0, 0.1);
        assert_eq!(buffer.colors()[0], [0.0, 1.0, 1.0]);
    }

    #[test]
    fn scaled_mode_matches_per_tick_at_reference_rate() {
        let mut per_tick = single_row([0.0, 2.0, 0.0], [0.05, 0.3, 0.0]);
        let mut scaled = single_row([0.0, 2.0, 0.0], [0.05, 0.3, 0.0]);
        let mut params = flare_params();
        params.ground_clamp = false;
        let mut scaled_params = params;
        scaled_params.gravity_mode = GravityMode::Scaled { reference_hz: 60.0 };

        for _ in 0..30 {
            step(&mut per_tick, &params, 1.0 / 60.0, 1.0);
            step(&mut scaled, &scaled_params, 1.0 / 60.0, 1.0);
        }
        for axis in 0..3 {
            assert!((per_tick.positions()[0][axis] - scaled.positions()[0][axis]).abs() < 1e-4);
        }
    }

    #[test]
    fn scaled_mode_zero_delta_does_not_move() {
        let mut params = flare_params();
        params.gravity_mode = GravityMode::Scaled { reference_hz: 60.0 };
        let mut buffer = single_row([0.0, 2.0, 0.0], [0.05, 0.3, 0.0]);
        step(&mut buffer, &params, 0.0, 1.0);
        assert_eq!(buffer.positions()[0], [0.0, 2.0, 0.0]);
        assert_eq!(buffer.velocities()[0], [0.05, 0.3, 0.0]);
    }
}
