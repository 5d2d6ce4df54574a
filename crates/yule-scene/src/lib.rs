//! Yule Scene - effect composition root
//!
//! `EffectManager` owns every transient effect in the holiday scene and
//! advances them once per frame:
//! - campfires, each with a re-triggerable flare
//! - any number of concurrent firework bursts
//! - the single airdrop sequence and the decorations it scatters
//! - ambient scalars (snow cover, camera shake, tree lights)

pub mod atmosphere;
pub mod campfire;
pub mod config;
pub mod decoration;
pub mod manager;

pub use atmosphere::{Atmosphere, AtmosphereConfig, PowerChange};
pub use campfire::{Campfire, FlameTongue};
pub use config::{SceneConfig, DEFAULT_TOML};
pub use decoration::{ConeScatter, Decoration, DecorationKind, DecorationLog, DecorationStore};
pub use manager::{CampfireView, EffectManager, FireworkView, RenderFrame, SceneStats};
