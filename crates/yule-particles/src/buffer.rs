//! Fixed-capacity particle storage

use crate::spread::SpreadPolicy;
use yule_core::{SceneRng, Vec3};

/// Per-particle kinematic and visual state, stored as parallel arrays.
///
/// The row count is fixed at construction. A particle is never removed:
/// "despawning" means zeroing its color, after which it stays in the buffer
/// (still stepped, inert) until the next `burst`.
pub struct ParticleBuffer {
    positions: Vec<[f32; 3]>,
    velocities: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl ParticleBuffer {
    /// Allocate `capacity` inert rows. Panics on zero capacity.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "particle buffer capacity must be non-zero");
        Self {
            positions: vec![[0.0; 3]; capacity],
            velocities: vec![[0.0; 3]; capacity],
            colors: vec![[0.0; 3]; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; a buffer has at least one row
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Re-initialise every row's position and velocity from `origin` and the
    /// spread policy. Colors are left to the owning effect.
    pub fn burst(&mut self, origin: Vec3, policy: &SpreadPolicy, rng: &mut SceneRng) {
        for (pos, vel) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            let (offset, velocity) = policy.sample(rng);
            *pos = (origin + offset).to_array();
            *vel = velocity.to_array();
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn velocities(&self) -> &[[f32; 3]] {
        &self.velocities
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Flat `x, y, z, x, y, z, ...` view for vertex upload
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat `r, g, b, r, g, b, ...` view for vertex upload
    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn set_color(&mut self, index: usize, color: [f32; 3]) {
        self.colors[index] = color;
    }

    pub fn fill_colors(&mut self, color: [f32; 3]) {
        self.colors.fill(color);
    }

    /// Hide every particle
    pub fn zero_colors(&mut self) {
        self.fill_colors([0.0; 3]);
    }

    /// Whether a row is visible (any non-zero color channel)
    pub fn is_lit(&self, index: usize) -> bool {
        self.colors[index].iter().any(|&c| c != 0.0)
    }

    pub fn lit_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_lit(i)).count()
    }

    /// Mutable access to all three attribute arrays at once, row-aligned
    pub fn rows_mut(
        &mut self,
    ) -> impl Iterator<Item = (&mut [f32; 3], &mut [f32; 3], &mut [f32; 3])> {
        self.positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.colors.iter_mut())
            .map(|((p, v), c)| (p, v, c))
    }
}
