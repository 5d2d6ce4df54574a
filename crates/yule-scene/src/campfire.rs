//! Campfire: a flare plus the always-on flame tongues

use yule_core::{SceneRng, Vec3};
use yule_particles::{FlareConfig, FlareEffect, FlareStatus};
use yule_runtime::FrameTime;

const TONGUE_COUNT: usize = 3;

/// Pose of one flame cone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameTongue {
    pub scale_y: f32,
    /// Radians
    pub rotation_z: f32,
}

impl Default for FlameTongue {
    fn default() -> Self {
        Self {
            scale_y: 1.0,
            rotation_z: 0.0,
        }
    }
}

pub struct Campfire {
    flare: FlareEffect,
    tongues: [FlameTongue; TONGUE_COUNT],
}

impl Campfire {
    pub fn new(anchor: Vec3, config: FlareConfig) -> Self {
        Self {
            flare: FlareEffect::new(anchor, config),
            tongues: [FlameTongue::default(); TONGUE_COUNT],
        }
    }

    /// Clicked: (re)start the flare
    pub fn ignite(&mut self, rng: &mut SceneRng) {
        self.flare.ignite(rng);
    }

    pub fn tick(&mut self, time: FrameTime) -> FlareStatus {
        let t = time.elapsed_f32();
        for (i, tongue) in self.tongues.iter_mut().enumerate() {
            let i = i as f32;
            tongue.scale_y = 1.0 + (t * 6.0 + i * 2.0).sin() * 0.3;
            tongue.rotation_z = (t * 3.0 + i).sin() * 0.1;
        }
        self.flare.tick(time)
    }

    pub fn anchor(&self) -> Vec3 {
        self.flare.anchor()
    }

    pub fn flare(&self) -> &FlareEffect {
        &self.flare
    }

    pub fn tongues(&self) -> &[FlameTongue] {
        &self.tongues
    }
}
