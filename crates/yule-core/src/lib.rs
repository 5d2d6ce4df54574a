//! Yule Core - Foundational types for the Yule scene simulation
//!
//! This crate provides the core types that all other Yule crates depend on:
//! - `Vec3`, `Color` - Spatial and color types
//! - `DecorationId` - Stable decoration identifiers
//! - `SceneRng` - Seeded xorshift PRNG shared by effects and spawners
//! - Error types and Result alias

mod error;
mod id;
mod rng;
mod types;

pub use error::{Result, YuleError};
pub use id::DecorationId;
pub use rng::SceneRng;
pub use types::{lerp_f32, Color, Vec3};
