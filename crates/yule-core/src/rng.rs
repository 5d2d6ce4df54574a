//! Lightweight xorshift32 PRNG shared by bursts and spawners

use std::time::{SystemTime, UNIX_EPOCH};

/// Seeded xorshift32 generator.
///
/// Every random draw in the simulation goes through one of these so a
/// scene can be replayed exactly from its seed.
#[derive(Debug, Clone)]
pub struct SceneRng {
    state: u32,
}

impl SceneRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(0xDEAD_BEEF);
        Self::new(nanos)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit an f32 mantissa exactly, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an angle in [0, 2π)
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }

    /// Uniformly pick one element. Panics on an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot pick from an empty slice");
        let idx = ((self.next_f32() * items.len() as f32) as usize).min(items.len() - 1);
        &items[idx]
    }

    /// Returns a random unit direction vector (uniformly on sphere surface)
    pub fn random_direction(&mut self) -> [f32; 3] {
        // Marsaglia method for uniform sphere sampling
        loop {
            let x = self.range(-1.0, 1.0);
            let y = self.range(-1.0, 1.0);
            let s = x * x + y * y;
            if s < 1.0 {
                let factor = 2.0 * (1.0 - s).sqrt();
                return [x * factor, y * factor, 1.0 - 2.0 * s];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = SceneRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_angle_bounds() {
        let mut rng = SceneRng::new(7);
        for _ in 0..1000 {
            let a = rng.angle();
            assert!((0.0..std::f32::consts::TAU).contains(&a));
        }
    }

    #[test]
    fn rng_direction_unit_length() {
        let mut rng = SceneRng::new(123);
        for _ in 0..100 {
            let d = rng.random_direction();
            let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
            assert!((len - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn rng_pick_covers_all_items() {
        let mut rng = SceneRng::new(99);
        let items = ['a', 'b', 'c', 'd'];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let c = *rng.pick(&items);
            seen[items.iter().position(|&i| i == c).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn rng_same_seed_same_sequence() {
        let mut a = SceneRng::new(5);
        let mut b = SceneRng::new(5);
        for _ in 0..10 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }
}
