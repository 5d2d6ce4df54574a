//! Ambient scene scalars: snow cover, camera shake and the tree lights

use serde::Deserialize;
use yule_core::{Result, YuleError};
use yule_runtime::AudioCue;

/// Tuning for the ambient scalars
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Snow accumulated per second
    pub snow_rate: f32,
    pub snow_max: f32,
    /// Pointer speed (pixels per event) below which movement is ignored
    pub shake_threshold: f32,
    /// Shake added per pixel of pointer speed
    pub shake_gain: f32,
    pub shake_max: f32,
    /// Fraction of shake kept every `shake_decay_interval` seconds
    pub shake_decay: f32,
    pub shake_decay_interval: f32,
    /// Seconds between the power-up cue and the lights coming on
    pub power_up_delay: f32,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            snow_rate: 0.005,
            snow_max: 0.8,
            shake_threshold: 5.0,
            shake_gain: 0.002,
            shake_max: 1.5,
            shake_decay: 0.9,
            shake_decay_interval: 0.1,
            power_up_delay: 1.5,
        }
    }
}

impl AtmosphereConfig {
    pub fn validate(&self) -> Result<()> {
        YuleError::check_range("atmosphere.snow_max", self.snow_max as f64, 0.0, 1.0)?;
        YuleError::check_range("atmosphere.shake_decay", self.shake_decay as f64, 0.0, 1.0)?;
        YuleError::check_positive(
            "atmosphere.shake_decay_interval",
            self.shake_decay_interval as f64,
        )?;
        YuleError::check_range(
            "atmosphere.power_up_delay",
            self.power_up_delay as f64,
            0.0,
            60.0,
        )
    }
}

/// Result of a power-button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerChange {
    /// Lights went off immediately
    SwitchedOff,
    /// Lights are charging and will come on after the delay
    Charging,
    /// A charge is already under way; the press did nothing
    Ignored,
}

impl PowerChange {
    pub fn cue(self) -> Option<AudioCue> {
        match self {
            PowerChange::SwitchedOff => Some(AudioCue::PowerDown),
            PowerChange::Charging => Some(AudioCue::PowerUp),
            PowerChange::Ignored => None,
        }
    }
}

/// Snow, shake and lights, advanced together once per frame
#[derive(Debug, Clone)]
pub struct Atmosphere {
    config: AtmosphereConfig,
    snow: f32,
    shake: f32,
    lights_on: bool,
    /// Seconds left until the lights come on
    charging: Option<f32>,
}

impl Atmosphere {
    pub fn new(config: AtmosphereConfig) -> Self {
        Self {
            config,
            snow: 0.0,
            shake: 0.0,
            lights_on: false,
            charging: None,
        }
    }

    /// Feed a pointer movement; fast swipes shake the camera
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        let speed = dx.abs() + dy.abs();
        if speed > self.config.shake_threshold {
            self.shake = (self.shake + speed * self.config.shake_gain).min(self.config.shake_max);
        }
    }

    /// Press the tree's power button
    pub fn toggle_power(&mut self) -> PowerChange {
        if self.charging.is_some() {
            return PowerChange::Ignored;
        }
        if self.lights_on {
            self.lights_on = false;
            PowerChange::SwitchedOff
        } else {
            self.charging = Some(self.config.power_up_delay);
            PowerChange::Charging
        }
    }

    /// Advance by `delta` seconds. Returns true on the tick the lights come on.
    pub fn update(&mut self, delta: f32) -> bool {
        if delta <= 0.0 {
            return false;
        }
        self.snow = (self.snow + self.config.snow_rate * delta).min(self.config.snow_max);
        self.shake *= self
            .config
            .shake_decay
            .powf(delta / self.config.shake_decay_interval);

        if let Some(remaining) = self.charging {
            let remaining = remaining - delta;
            if remaining <= 0.0 {
                self.charging = None;
                self.lights_on = true;
                return true;
            }
            self.charging = Some(remaining);
        }
        false
    }

    pub fn snow_amount(&self) -> f32 {
        self.snow
    }

    pub fn shake_intensity(&self) -> f32 {
        self.shake
    }

    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    pub fn is_charging(&self) -> bool {
        self.charging.is_some()
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::new(AtmosphereConfig::default())
    }
}
