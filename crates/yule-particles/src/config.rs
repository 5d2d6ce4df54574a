//! Effect configuration, parsed from TOML tables and validated up front

use crate::integrator::{ColorRamp, GravityMode, PhysicsParams};
use crate::spread::SpreadPolicy;
use yule_core::{Color, Result, YuleError};

const MAX_PARTICLES: usize = 10_000;

/// Campfire flare settings
#[derive(Debug, Clone, PartialEq)]
pub struct FlareConfig {
    pub particle_count: usize,
    /// Seconds a flare stays active after ignition
    pub duration: f32,
    pub gravity: f32,
    pub drag: f32,
    /// Life ratio above which particles render near-white
    pub white_threshold: f32,
    pub spread: SpreadPolicy,
    pub gravity_mode: GravityMode,
    pub point_size: f32,
    /// Resting light intensity
    pub light_base: f32,
    /// Extra intensity right after ignition
    pub light_flash: f32,
    /// How fast the flash fades (per second)
    pub light_flash_decay: f32,
    /// Amplitude of the sinusoidal flicker
    pub light_flicker: f32,
}

impl Default for FlareConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            duration: 2.0,
            gravity: 0.008,
            drag: 0.98,
            white_threshold: 0.8,
            spread: SpreadPolicy::flare_default(),
            gravity_mode: GravityMode::PerTick,
            point_size: 0.25,
            light_base: 1.5,
            light_flash: 8.0,
            light_flash_decay: 1.5,
            light_flicker: 0.5,
        }
    }
}

impl FlareConfig {
    /// Parse from a `[flare]` table. Missing keys keep their defaults.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("particle_count") {
            config.particle_count = toml_count(v, "particle_count")?;
        }
        if let Some(v) = table.get("duration") {
            config.duration = toml_f32(v, "duration")?;
        }
        if let Some(v) = table.get("gravity") {
            config.gravity = toml_f32(v, "gravity")?;
        }
        if let Some(v) = table.get("drag") {
            config.drag = toml_f32(v, "drag")?;
        }
        if let Some(v) = table.get("white_threshold") {
            config.white_threshold = toml_f32(v, "white_threshold")?;
        }
        if let Some(v) = table.get("point_size") {
            config.point_size = toml_f32(v, "point_size")?;
        }
        if let Some(v) = table.get("light_base") {
            config.light_base = toml_f32(v, "light_base")?;
        }
        if let Some(v) = table.get("light_flash") {
            config.light_flash = toml_f32(v, "light_flash")?;
        }
        if let Some(v) = table.get("light_flash_decay") {
            config.light_flash_decay = toml_f32(v, "light_flash_decay")?;
        }
        if let Some(v) = table.get("light_flicker") {
            config.light_flicker = toml_f32(v, "light_flicker")?;
        }

        // Cone spread
        if let SpreadPolicy::Cone {
            horizontal_jitter,
            base_height,
            height_jitter,
            horizontal_speed,
            upward_min,
            upward_max,
        } = config.spread
        {
            config.spread = SpreadPolicy::Cone {
                horizontal_jitter: table
                    .get("spawn_jitter")
                    .map(|v| toml_f32(v, "spawn_jitter"))
                    .transpose()?
                    .unwrap_or(horizontal_jitter),
                base_height: table
                    .get("spawn_height")
                    .map(|v| toml_f32(v, "spawn_height"))
                    .transpose()?
                    .unwrap_or(base_height),
                height_jitter: table
                    .get("spawn_height_jitter")
                    .map(|v| toml_f32(v, "spawn_height_jitter"))
                    .transpose()?
                    .unwrap_or(height_jitter),
                horizontal_speed: table
                    .get("horizontal_speed")
                    .map(|v| toml_f32(v, "horizontal_speed"))
                    .transpose()?
                    .unwrap_or(horizontal_speed),
                upward_min: table
                    .get("upward_min")
                    .map(|v| toml_f32(v, "upward_min"))
                    .transpose()?
                    .unwrap_or(upward_min),
                upward_max: table
                    .get("upward_max")
                    .map(|v| toml_f32(v, "upward_max"))
                    .transpose()?
                    .unwrap_or(upward_max),
            };
        }

        config.gravity_mode = parse_gravity_mode(table)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_count("flare.particle_count", self.particle_count)?;
        YuleError::check_positive("flare.duration", self.duration as f64)?;
        YuleError::check_range("flare.gravity", self.gravity as f64, 0.0, 1.0)?;
        check_drag("flare.drag", self.drag)?;
        YuleError::check_range("flare.white_threshold", self.white_threshold as f64, 0.0, 1.0)?;
        YuleError::check_positive("flare.point_size", self.point_size as f64)?;
        check_spread("flare", &self.spread)?;
        check_gravity_mode("flare", self.gravity_mode)
    }

    pub fn physics_params(&self) -> PhysicsParams {
        PhysicsParams {
            gravity: self.gravity,
            drag: self.drag,
            drag_vertical: false,
            ground_clamp: true,
            gravity_mode: self.gravity_mode,
            color_ramp: ColorRamp::Flare {
                white_threshold: self.white_threshold,
            },
        }
    }
}

/// Firework burst settings
#[derive(Debug, Clone, PartialEq)]
pub struct FireworkConfig {
    pub particle_count: usize,
    /// Seconds until the burst completes and is released
    pub duration: f32,
    pub gravity: f32,
    pub drag: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Each particle gets one palette color, chosen uniformly
    pub palette: Vec<Color>,
    pub gravity_mode: GravityMode,
    pub point_size: f32,
    pub light_intensity: f32,
    pub light_color: Color,
}

impl Default for FireworkConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            duration: 2.0,
            gravity: 0.005,
            drag: 0.98,
            speed_min: 0.1,
            speed_max: 0.3,
            palette: vec![
                Color::from_hex(0xFF0000),
                Color::from_hex(0xFFD700),
                Color::from_hex(0x00FF00),
                Color::from_hex(0x00FFFF),
            ],
            gravity_mode: GravityMode::PerTick,
            point_size: 0.15,
            light_intensity: 2.0,
            light_color: Color::from_hex(0xFFD700),
        }
    }
}

impl FireworkConfig {
    /// Parse from a `[firework]` table. Missing keys keep their defaults.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("particle_count") {
            config.particle_count = toml_count(v, "particle_count")?;
        }
        if let Some(v) = table.get("duration") {
            config.duration = toml_f32(v, "duration")?;
        }
        if let Some(v) = table.get("gravity") {
            config.gravity = toml_f32(v, "gravity")?;
        }
        if let Some(v) = table.get("drag") {
            config.drag = toml_f32(v, "drag")?;
        }
        if let Some(v) = table.get("speed_min") {
            config.speed_min = toml_f32(v, "speed_min")?;
        }
        if let Some(v) = table.get("speed_max") {
            config.speed_max = toml_f32(v, "speed_max")?;
        }
        if let Some(v) = table.get("palette") {
            config.palette = toml_palette(v)?;
        }
        if let Some(v) = table.get("point_size") {
            config.point_size = toml_f32(v, "point_size")?;
        }
        if let Some(v) = table.get("light_intensity") {
            config.light_intensity = toml_f32(v, "light_intensity")?;
        }
        if let Some(v) = table.get("light_color") {
            config.light_color = toml_color(v)?;
        }

        config.gravity_mode = parse_gravity_mode(table)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_count("firework.particle_count", self.particle_count)?;
        YuleError::check_positive("firework.duration", self.duration as f64)?;
        YuleError::check_range("firework.gravity", self.gravity as f64, 0.0, 1.0)?;
        check_drag("firework.drag", self.drag)?;
        YuleError::check_positive("firework.point_size", self.point_size as f64)?;
        if self.palette.is_empty() {
            return Err(YuleError::InvalidConfig(
                "firework.palette must name at least one color".into(),
            ));
        }
        check_spread("firework", &self.spread())?;
        check_gravity_mode("firework", self.gravity_mode)
    }

    pub fn spread(&self) -> SpreadPolicy {
        SpreadPolicy::Sphere {
            speed_min: self.speed_min,
            speed_max: self.speed_max,
        }
    }

    pub fn physics_params(&self) -> PhysicsParams {
        PhysicsParams {
            gravity: self.gravity,
            drag: self.drag,
            drag_vertical: true,
            ground_clamp: false,
            gravity_mode: self.gravity_mode,
            color_ramp: ColorRamp::Keep,
        }
    }
}

// ── Validation helpers ──

fn check_count(field: &str, count: usize) -> Result<()> {
    if count == 0 || count > MAX_PARTICLES {
        return Err(YuleError::ValueOutOfRange {
            field: field.to_string(),
            min: 1.0,
            max: MAX_PARTICLES as f64,
            value: count as f64,
        });
    }
    Ok(())
}

fn check_drag(field: &str, drag: f32) -> Result<()> {
    YuleError::check_positive(field, drag as f64)?;
    YuleError::check_range(field, drag as f64, 0.0, 1.0)
}

fn check_spread(prefix: &str, spread: &SpreadPolicy) -> Result<()> {
    match *spread {
        SpreadPolicy::Cone {
            horizontal_jitter,
            height_jitter,
            horizontal_speed,
            upward_min,
            upward_max,
            ..
        } => {
            if horizontal_jitter < 0.0 || height_jitter < 0.0 || horizontal_speed < 0.0 {
                return Err(YuleError::InvalidConfig(format!(
                    "{prefix} spread extents must not be negative"
                )));
            }
            if upward_min > upward_max {
                return Err(YuleError::InvalidConfig(format!(
                    "{prefix}.upward_min ({upward_min}) exceeds upward_max ({upward_max})"
                )));
            }
        }
        SpreadPolicy::Sphere {
            speed_min,
            speed_max,
        } => {
            if speed_min < 0.0 || speed_min > speed_max {
                return Err(YuleError::InvalidConfig(format!(
                    "{prefix} speed range [{speed_min}, {speed_max}] is invalid"
                )));
            }
        }
    }
    Ok(())
}

fn check_gravity_mode(prefix: &str, mode: GravityMode) -> Result<()> {
    if let GravityMode::Scaled { reference_hz } = mode {
        YuleError::check_positive(&format!("{prefix}.reference_hz"), reference_hz as f64)?;
    }
    Ok(())
}

// ── TOML helpers (handle integer/float coercion) ──

fn parse_gravity_mode(table: &toml::value::Table) -> Result<GravityMode> {
    let reference_hz = table
        .get("reference_hz")
        .map(|v| toml_f32(v, "reference_hz"))
        .transpose()?
        .unwrap_or(60.0);
    match table.get("gravity_mode").and_then(|v| v.as_str()) {
        None | Some("per_tick") => Ok(GravityMode::PerTick),
        Some("scaled") => Ok(GravityMode::Scaled { reference_hz }),
        Some(other) => Err(YuleError::InvalidConfig(format!(
            "unknown gravity_mode '{other}'; expected 'per_tick' or 'scaled'"
        ))),
    }
}

fn toml_f32(v: &toml::Value, field: &str) -> Result<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .ok_or_else(|| YuleError::InvalidConfig(format!("{field} must be a number, got {v}")))
}

fn toml_count(v: &toml::Value, field: &str) -> Result<usize> {
    match v.as_integer() {
        Some(n) if n > 0 => Ok(n as usize),
        _ => Err(YuleError::InvalidConfig(format!(
            "{field} must be a positive integer, got {v}"
        ))),
    }
}

fn toml_color(v: &toml::Value) -> Result<Color> {
    let s = v
        .as_str()
        .ok_or_else(|| YuleError::InvalidColor(v.to_string()))?;
    Color::parse_hex(s)
}

fn toml_palette(v: &toml::Value) -> Result<Vec<Color>> {
    let arr = v
        .as_array()
        .ok_or_else(|| YuleError::InvalidConfig("palette must be an array of hex colors".into()))?;
    arr.iter().map(toml_color).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::value::Table {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        FlareConfig::default().validate().unwrap();
        FireworkConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_flare_overrides() {
        let config = FlareConfig::from_toml(&table(
            r#"
particle_count = 64
duration = 3
drag = 0.95
upward_max = 0.5
gravity_mode = "scaled"
reference_hz = 30
"#,
        ))
        .unwrap();
        assert_eq!(config.particle_count, 64);
        assert!((config.duration - 3.0).abs() < 1e-6);
        assert!((config.drag - 0.95).abs() < 1e-6);
        assert_eq!(config.gravity_mode, GravityMode::Scaled { reference_hz: 30.0 });
        match config.spread {
            SpreadPolicy::Cone { upward_max, upward_min, .. } => {
                assert!((upward_max - 0.5).abs() < 1e-6);
                assert!((upward_min - 0.15).abs() < 1e-6);
            }
            _ => panic!("Expected Cone spread"),
        }
    }

    #[test]
    fn parse_firework_palette() {
        let config = FireworkConfig::from_toml(&table(
            r##"
palette = ["#ff0000", "#00ff00"]
light_color = "#ffffff"
speed_max = 0.5
"##,
        ))
        .unwrap();
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.light_color, Color::WHITE);
        assert!((config.speed_max - 0.5).abs() < 1e-6);
    }

    #[test]
    fn toml_integer_float_coercion() {
        let config = FireworkConfig::from_toml(&table("gravity = 0\nduration = 4")).unwrap();
        assert_eq!(config.gravity, 0.0);
        assert!((config.duration - 4.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = FlareConfig::from_toml(&table("duration = \"3\"")).unwrap_err();
        assert!(err.to_string().contains("duration"));
        assert!(FlareConfig::from_toml(&table("spawn_jitter = true")).is_err());
        assert!(FlareConfig::from_toml(&table("gravity_mode = \"scaled\"\nreference_hz = \"fast\"")).is_err());
        assert!(FireworkConfig::from_toml(&table("speed_max = [0.5]")).is_err());
    }

    #[test]
    fn rejects_zero_particles() {
        assert!(FlareConfig::from_toml(&table("particle_count = 0")).is_err());
    }

    #[test]
    fn rejects_non_positive_duration() {
        assert!(FireworkConfig::from_toml(&table("duration = -1.0")).is_err());
    }

    #[test]
    fn rejects_unknown_gravity_mode() {
        let err = FlareConfig::from_toml(&table("gravity_mode = \"sideways\"")).unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn rejects_empty_palette_and_bad_hex() {
        assert!(FireworkConfig::from_toml(&table("palette = []")).is_err());
        assert!(FireworkConfig::from_toml(&table("palette = [\"#12\"]")).is_err());
    }

    #[test]
    fn rejects_drag_above_one() {
        assert!(FlareConfig::from_toml(&table("drag = 1.2")).is_err());
    }
}
