//! Scene configuration: one TOML file describing every effect in the scene

use crate::atmosphere::AtmosphereConfig;
use crate::decoration::ConeScatter;
use serde::Deserialize;
use std::path::Path;
use yule_core::{Result, Vec3, YuleError};
use yule_particles::{FireworkConfig, FlareConfig};
use yule_sequence::AirdropConfig;

const MAX_DECORATIONS_PER_AIRDROP: usize = 10_000;

/// The default scene, as printed by `yule defaults`
pub const DEFAULT_TOML: &str = r##"# Yule scene configuration

[scene]
# Omit for a time-based seed
# seed = 42
decorations_per_airdrop = 50
airdrop_firework_at = [0.0, 2.0, 0.0]
max_fireworks = 32

[[campfire]]
position = [4.0, 0.0, 2.0]

[[campfire]]
position = [-3.0, 0.0, 3.0]

[[campfire]]
position = [0.0, 0.0, -5.0]

[scatter]
base_height = 1.5
height = 3.5
base_radius = 1.5

[flare]
particle_count = 100
duration = 2.0
gravity = 0.008
drag = 0.98
white_threshold = 0.8
gravity_mode = "per_tick"

[firework]
particle_count = 150
duration = 2.0
gravity = 0.005
drag = 0.98
speed_min = 0.1
speed_max = 0.3
palette = ["#ff0000", "#ffd700", "#00ff00", "#00ffff"]
light_color = "#ffd700"
gravity_mode = "per_tick"

[airdrop]
approach_duration = 3.0
drop_start_altitude = 20.0
landing_altitude = 0.5
drop_rate = 1.5
impact_hold = 1.0

[atmosphere]
snow_rate = 0.005
snow_max = 0.8
shake_threshold = 5.0
power_up_delay = 1.5
"##;

/// Everything the effect manager needs to build a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// RNG seed; `None` seeds from the wall clock
    pub seed: Option<u32>,
    pub decorations_per_airdrop: usize,
    /// Where the celebratory firework goes off when the airdrop explodes
    pub airdrop_firework_at: Vec3,
    /// Concurrent bursts kept alive; the oldest is dropped beyond this
    pub max_fireworks: usize,
    /// Campfire anchors, in click-index order
    pub campfires: Vec<Vec3>,
    pub scatter: ConeScatter,
    pub flare: FlareConfig,
    pub firework: FireworkConfig,
    pub airdrop: AirdropConfig,
    pub atmosphere: AtmosphereConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            decorations_per_airdrop: 50,
            airdrop_firework_at: Vec3::new(0.0, 2.0, 0.0),
            max_fireworks: 32,
            campfires: vec![
                Vec3::new(4.0, 0.0, 2.0),
                Vec3::new(-3.0, 0.0, 3.0),
                Vec3::new(0.0, 0.0, -5.0),
            ],
            scatter: ConeScatter::default(),
            flare: FlareConfig::default(),
            firework: FireworkConfig::default(),
            airdrop: AirdropConfig::default(),
            atmosphere: AtmosphereConfig::default(),
        }
    }
}

/// `[scene]` table
#[derive(Debug, Deserialize)]
#[serde(default)]
struct SceneSection {
    seed: Option<u32>,
    decorations_per_airdrop: usize,
    airdrop_firework_at: Vec3,
    max_fireworks: usize,
}

impl Default for SceneSection {
    fn default() -> Self {
        let defaults = SceneConfig::default();
        Self {
            seed: defaults.seed,
            decorations_per_airdrop: defaults.decorations_per_airdrop,
            airdrop_firework_at: defaults.airdrop_firework_at,
            max_fireworks: defaults.max_fireworks,
        }
    }
}

impl SceneConfig {
    /// Parse a scene file. Missing sections and keys keep their defaults;
    /// the result is validated before it is returned.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let doc: toml::Table = src.parse()?;
        let mut config = Self::default();

        if let Some(value) = doc.get("scene") {
            let section: SceneSection = value.clone().try_into()?;
            config.seed = section.seed;
            config.decorations_per_airdrop = section.decorations_per_airdrop;
            config.airdrop_firework_at = section.airdrop_firework_at;
            config.max_fireworks = section.max_fireworks;
        }

        if let Some(value) = doc.get("campfire") {
            let entries = value.as_array().ok_or_else(|| {
                YuleError::InvalidConfig("campfire must be an array of tables ([[campfire]])".into())
            })?;
            config.campfires = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    entry
                        .get("position")
                        .ok_or_else(|| {
                            YuleError::InvalidConfig(format!("campfire {i} has no position"))
                        })
                        .and_then(|v| toml_vec3(v, &format!("campfire {i} position")))
                })
                .collect::<Result<Vec<_>>>()?;
        }

        if let Some(value) = doc.get("scatter") {
            config.scatter = value.clone().try_into()?;
        }
        if let Some(table) = section_table(&doc, "flare")? {
            config.flare = FlareConfig::from_toml(table)?;
        }
        if let Some(table) = section_table(&doc, "firework")? {
            config.firework = FireworkConfig::from_toml(table)?;
        }
        if let Some(value) = doc.get("airdrop") {
            config.airdrop = value.clone().try_into()?;
        }
        if let Some(value) = doc.get("atmosphere") {
            config.atmosphere = value.clone().try_into()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse a scene file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&src)?;
        log::info!(
            "[scene] Loaded {} ({} campfires, {} decorations per airdrop)",
            path.display(),
            config.campfires.len(),
            config.decorations_per_airdrop
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decorations_per_airdrop > MAX_DECORATIONS_PER_AIRDROP {
            return Err(YuleError::ValueOutOfRange {
                field: "scene.decorations_per_airdrop".into(),
                min: 0.0,
                max: MAX_DECORATIONS_PER_AIRDROP as f64,
                value: self.decorations_per_airdrop as f64,
            });
        }
        if self.max_fireworks == 0 {
            return Err(YuleError::InvalidConfig(
                "scene.max_fireworks must be at least 1".into(),
            ));
        }
        YuleError::check_positive("scatter.height", self.scatter.height as f64)?;
        YuleError::check_positive("scatter.base_radius", self.scatter.base_radius as f64)?;
        self.flare.validate()?;
        self.firework.validate()?;
        self.airdrop.validate()?;
        self.atmosphere.validate()
    }
}

fn section_table<'a>(doc: &'a toml::Table, key: &str) -> Result<Option<&'a toml::Table>> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_table()
            .map(Some)
            .ok_or_else(|| YuleError::InvalidConfig(format!("[{key}] must be a table"))),
    }
}

fn toml_vec3(v: &toml::Value, what: &str) -> Result<Vec3> {
    let arr = v
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| YuleError::InvalidConfig(format!("{what} must be [x, y, z]")))?;
    let mut out = [0.0f32; 3];
    for (slot, item) in out.iter_mut().zip(arr) {
        *slot = item
            .as_float()
            .map(|f| f as f32)
            .or_else(|| item.as_integer().map(|i| i as f32))
            .ok_or_else(|| YuleError::InvalidConfig(format!("{what} must be numeric")))?;
    }
    Ok(Vec3::from_array(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_matches_defaults() {
        let parsed = SceneConfig::from_toml_str(DEFAULT_TOML).unwrap();
        assert_eq!(parsed, SceneConfig::default());
    }

    #[test]
    fn default_toml_carries_hex_palette_and_every_section() {
        assert!(DEFAULT_TOML.contains(r##"palette = ["#ff0000", "#ffd700", "#00ff00", "#00ffff"]"##));
        assert!(DEFAULT_TOML.contains(r##"light_color = "#ffd700""##));
        for section in ["[scene]", "[[campfire]]", "[scatter]", "[flare]", "[firework]", "[airdrop]", "[atmosphere]"] {
            assert!(DEFAULT_TOML.contains(section), "missing {section}");
        }
        assert!(DEFAULT_TOML.trim_end().ends_with("power_up_delay = 1.5"));
    }

    #[test]
    fn empty_file_is_default_scene() {
        assert_eq!(SceneConfig::from_toml_str("").unwrap(), SceneConfig::default());
    }

    #[test]
    fn parses_campfires_and_scene_keys() {
        let config = SceneConfig::from_toml_str(
            r#"
[scene]
seed = 7
decorations_per_airdrop = 12

[[campfire]]
position = [1, 0, -2]
"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.decorations_per_airdrop, 12);
        assert_eq!(config.campfires, vec![Vec3::new(1.0, 0.0, -2.0)]);
        assert_eq!(config.max_fireworks, 32);
    }

    #[test]
    fn section_overrides_keep_other_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
[flare]
particle_count = 20

[airdrop]
impact_hold = 2.0
"#,
        )
        .unwrap();
        assert_eq!(config.flare.particle_count, 20);
        assert!((config.flare.drag - 0.98).abs() < 1e-6);
        assert!((config.airdrop.impact_hold - 2.0).abs() < 1e-6);
        assert!((config.airdrop.approach_duration - 3.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_campfire_without_position() {
        let err = SceneConfig::from_toml_str("[[campfire]]\nname = \"x\"").unwrap_err();
        assert!(err.to_string().contains("campfire 0"));
    }

    #[test]
    fn rejects_short_position() {
        assert!(SceneConfig::from_toml_str("[[campfire]]\nposition = [1, 2]").is_err());
    }

    #[test]
    fn rejects_invalid_sub_config() {
        assert!(SceneConfig::from_toml_str("[airdrop]\ndrop_rate = 0.0").is_err());
        assert!(SceneConfig::from_toml_str("[firework]\nparticle_count = 0").is_err());
        assert!(SceneConfig::from_toml_str("[scene]\nmax_fireworks = 0").is_err());
    }

    #[test]
    fn reports_syntax_errors() {
        assert!(SceneConfig::from_toml_str("[scene\nseed = 1").is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SceneConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, YuleError::IoError(_)));
    }
}
