//! Yule Particles - transient particle effects
//!
//! Provides the particle core shared by the campfire flare and the firework
//! burst:
//! - `ParticleBuffer` - fixed-capacity structure-of-arrays storage
//! - `SpreadPolicy` - cone and sphere burst initialisation
//! - `integrator::step` - gravity, drag, color-by-age and ground clamp
//! - `Lifetime` - bounded lifetime with a single completion report
//! - `FlareEffect` / `FireworkBurst` - the two concrete effects
//! - `ParticleInstance` - packed per-particle render data

pub mod buffer;
pub mod config;
pub mod firework;
pub mod flare;
pub mod instance;
pub mod integrator;
pub mod lifetime;
pub mod spread;

pub use buffer::ParticleBuffer;
pub use config::{FireworkConfig, FlareConfig};
pub use firework::FireworkBurst;
pub use flare::{FlareEffect, FlareStatus};
pub use instance::ParticleInstance;
pub use integrator::{ColorRamp, GravityMode, PhysicsParams};
pub use lifetime::{Lifetime, LifetimeStatus};
pub use spread::SpreadPolicy;
