//! Airdrop sequence controller
//!
//! IDLE → APPROACH → DROP → IMPACT → IDLE. A ground indicator sweeps in,
//! a gift box falls with a spin, wobbles on landing, then explodes. The
//! controller owns only the animation scalars; what the explosion spawns is
//! up to whoever handles `SequenceTrigger::Explode`.

use crate::config::AirdropConfig;
use crate::phase::{Phase, SequenceTrigger};
use yule_core::{lerp_f32, Vec3};

/// Render-facing snapshot of the airdrop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirdropView {
    pub phase: Phase,
    /// Ground indicator x position
    pub indicator_x: f32,
    pub indicator_opacity: f32,
    /// The box is drawn during Drop and Impact
    pub box_visible: bool,
    pub box_altitude: f32,
    /// Euler rotation in radians
    pub box_rotation: Vec3,
    /// Uniform scale
    pub box_scale: f32,
}

/// Drives one airdrop at a time.
///
/// Starting uses a request/acknowledge handshake: `request_start` marks a
/// pending start, the next `tick` consumes it when idle. Requests made while
/// a run is in progress are ignored.
pub struct AirdropController {
    config: AirdropConfig,
    phase: Phase,
    phase_elapsed: f32,
    pending_start: bool,
    indicator_x: f32,
    indicator_opacity: f32,
    altitude: f32,
    rotation: Vec3,
    scale: f32,
}

impl AirdropController {
    /// Panics if `config` fails validation.
    pub fn new(config: AirdropConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid airdrop config: {e}");
        }
        let mut controller = Self {
            indicator_x: config.indicator_start_x,
            altitude: config.drop_start_altitude,
            config,
            phase: Phase::Idle,
            phase_elapsed: 0.0,
            pending_start: false,
            indicator_opacity: 0.0,
            rotation: Vec3::ZERO,
            scale: 1.0,
        };
        controller.reset_visuals();
        controller
    }

    /// Ask for a run. Returns false (and changes nothing) if a run is already
    /// in progress or a start is already pending.
    pub fn request_start(&mut self) -> bool {
        if self.phase != Phase::Idle || self.pending_start {
            return false;
        }
        self.pending_start = true;
        true
    }

    /// Advance one frame and return the triggers fired on it, in order.
    ///
    /// At most one phase transition happens per tick; a delta longer than a
    /// whole phase is not carried over into the next one.
    pub fn tick(&mut self, delta: f32) -> Vec<SequenceTrigger> {
        let delta = if delta.is_nan() { 0.0 } else { delta.max(0.0) };
        let mut triggers = Vec::new();

        match self.phase {
            Phase::Idle => {
                if self.pending_start {
                    self.pending_start = false;
                    self.reset_visuals();
                    self.advance_phase();
                    triggers.push(SequenceTrigger::Started);
                }
            }
            _ if delta == 0.0 => {}
            Phase::Approach => {
                self.phase_elapsed += delta;
                let e = self.phase_elapsed;
                let t = (e / self.config.approach_duration).min(1.0);
                self.indicator_x =
                    lerp_f32(self.config.indicator_start_x, self.config.indicator_end_x, t);
                self.indicator_opacity =
                    (e * self.config.indicator_fade_rate).min(self.config.indicator_max_opacity);

                if e > self.config.approach_duration {
                    self.altitude = self.config.drop_start_altitude;
                    self.advance_phase();
                }
            }
            Phase::Drop => {
                self.phase_elapsed += delta;
                let progress = (self.phase_elapsed * self.config.drop_rate).min(1.0);
                let eased = progress * progress;
                let fall = self.config.drop_start_altitude - self.config.landing_altitude;
                self.altitude = self.config.drop_start_altitude - eased * fall;

                self.rotation.x += delta * self.config.spin_x;
                self.rotation.z += delta * self.config.spin_z;

                // Full progress lands even if the eased altitude rounds above the floor
                if progress >= 1.0 || self.altitude <= self.config.landing_altitude {
                    self.altitude = self.config.landing_altitude;
                    self.rotation = Vec3::ZERO;
                    self.advance_phase();
                    triggers.push(SequenceTrigger::Landed);
                }
            }
            Phase::Impact => {
                self.phase_elapsed += delta;
                let e = self.phase_elapsed;
                let decay = (1.0 - e / self.config.impact_hold).max(0.0);
                self.scale = 1.0
                    + (e * self.config.wobble_frequency).sin()
                        * self.config.wobble_amplitude
                        * decay;

                if e > self.config.impact_hold {
                    triggers.push(SequenceTrigger::Explode);
                    triggers.push(SequenceTrigger::Complete);
                    self.reset_visuals();
                    self.advance_phase();
                }
            }
        }

        triggers
    }

    /// Move to the next phase in the script and restart the phase clock
    fn advance_phase(&mut self) {
        let phase = self.phase.next();
        log::debug!(
            "[airdrop] {:?} -> {:?} after {:.3}s",
            self.phase,
            phase,
            self.phase_elapsed
        );
        self.phase = phase;
        self.phase_elapsed = 0.0;
    }

    fn reset_visuals(&mut self) {
        self.indicator_x = self.config.indicator_start_x;
        self.indicator_opacity = 0.0;
        self.altitude = self.config.drop_start_altitude;
        self.rotation = Vec3::ZERO;
        self.scale = 1.0;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds since the current phase was entered
    pub fn phase_elapsed(&self) -> f32 {
        self.phase_elapsed
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn has_pending_start(&self) -> bool {
        self.pending_start
    }

    pub fn config(&self) -> &AirdropConfig {
        &self.config
    }

    pub fn view(&self) -> AirdropView {
        AirdropView {
            phase: self.phase,
            indicator_x: self.indicator_x,
            indicator_opacity: self.indicator_opacity,
            box_visible: matches!(self.phase, Phase::Drop | Phase::Impact),
            box_altitude: self.altitude,
            box_rotation: self.rotation,
            box_scale: self.scale,
        }
    }
}

impl Default for AirdropController {
    fn default() -> Self {
        Self::new(AirdropConfig::default())
    }
}
