//! Airdrop tuning

use serde::Deserialize;
use yule_core::{Result, YuleError};

/// Timing and motion constants for the airdrop sequence.
///
/// Durations are in seconds, distances in world units, spin in radians per
/// second.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AirdropConfig {
    /// How long the ground indicator sweeps in before the drop
    pub approach_duration: f32,
    pub indicator_start_x: f32,
    pub indicator_end_x: f32,
    /// Opacity gained per second of approach
    pub indicator_fade_rate: f32,
    pub indicator_max_opacity: f32,
    pub drop_start_altitude: f32,
    pub landing_altitude: f32,
    /// Fall progress per second; the drop lasts `1 / drop_rate` seconds
    pub drop_rate: f32,
    pub spin_x: f32,
    pub spin_z: f32,
    /// Wobble time on the ground before the explosion
    pub impact_hold: f32,
    pub wobble_frequency: f32,
    pub wobble_amplitude: f32,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            approach_duration: 3.0,
            indicator_start_x: -10.0,
            indicator_end_x: 0.0,
            indicator_fade_rate: 0.2,
            indicator_max_opacity: 0.5,
            drop_start_altitude: 20.0,
            landing_altitude: 0.5,
            drop_rate: 1.5,
            spin_x: 5.0,
            spin_z: 3.0,
            impact_hold: 1.0,
            wobble_frequency: 20.0,
            wobble_amplitude: 0.1,
        }
    }
}

impl AirdropConfig {
    pub fn validate(&self) -> Result<()> {
        YuleError::check_positive("airdrop.approach_duration", self.approach_duration as f64)?;
        YuleError::check_positive("airdrop.drop_rate", self.drop_rate as f64)?;
        YuleError::check_positive("airdrop.impact_hold", self.impact_hold as f64)?;
        YuleError::check_range(
            "airdrop.indicator_max_opacity",
            self.indicator_max_opacity as f64,
            0.0,
            1.0,
        )?;
        if self.drop_start_altitude <= self.landing_altitude {
            return Err(YuleError::InvalidConfig(format!(
                "airdrop.drop_start_altitude ({}) must be above landing_altitude ({})",
                self.drop_start_altitude, self.landing_altitude
            )));
        }
        Ok(())
    }
}
