//! Packed per-particle render data

use crate::buffer::ParticleBuffer;
use bytemuck::{Pod, Zeroable};
use yule_core::Vec3;

/// GPU instance data for one visible particle.
/// 32 bytes, two rows of vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// World position + point size packed into vec4
    pub pos_size: [f32; 4], // xyz = position, w = size
    /// Color with alpha
    pub color: [f32; 4], // rgba
}

impl ParticleInstance {
    pub fn new(world_position: [f32; 3], size: f32, color: [f32; 3], alpha: f32) -> Self {
        Self {
            pos_size: [world_position[0], world_position[1], world_position[2], size],
            color: [color[0], color[1], color[2], alpha],
        }
    }

    /// Append one instance per lit row of `buffer`, offset by `anchor`.
    /// Returns how many were written. Hidden (zero-color) rows are skipped.
    pub fn pack(
        buffer: &ParticleBuffer,
        anchor: Vec3,
        size: f32,
        alpha: f32,
        out: &mut Vec<ParticleInstance>,
    ) -> usize {
        let start = out.len();
        for (i, pos) in buffer.positions().iter().enumerate() {
            if !buffer.is_lit(i) {
                continue;
            }
            let world = anchor + Vec3::from_array(*pos);
            out.push(Self::new(world.to_array(), size, buffer.colors()[i], alpha));
        }
        out.len() - start
    }
}
