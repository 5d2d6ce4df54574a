//! Decoration records and the store contract they are handed to

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use yule_core::{Color, DecorationId, SceneRng, Vec3};

const MAX_MESSAGE_CHARS: usize = 50;
const DEFAULT_MESSAGE: &str = "Happy Holidays!";
const AIRDROP_SENDER: &str = "Santa";
const AIRDROP_MESSAGE: &str = "Ho Ho Ho!";

/// Colors the airdrop picks from
pub const AIRDROP_PALETTE: [u32; 5] = [0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF];

/// Ornament shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Orb,
    Star,
    Candy,
    Stocking,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 4] = [
        DecorationKind::Orb,
        DecorationKind::Star,
        DecorationKind::Candy,
        DecorationKind::Stocking,
    ];
}

/// One ornament hung on the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: DecorationId,
    pub position: Vec3,
    pub kind: DecorationKind,
    pub color: Color,
    pub sender: String,
    pub message: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl Decoration {
    /// A decoration placed by a user. Blank messages get a greeting; long
    /// ones are cut to 50 characters.
    pub fn placed_by(
        sender: &str,
        position: Vec3,
        kind: DecorationKind,
        color: Color,
        message: &str,
    ) -> Self {
        let trimmed = message.trim();
        let message = if trimmed.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            trimmed.chars().take(MAX_MESSAGE_CHARS).collect()
        };
        Self {
            id: DecorationId::new(),
            position,
            kind,
            color,
            sender: sender.to_string(),
            message,
            timestamp_ms: now_ms(),
        }
    }
}

/// Receives newly created decorations. The store alone decides how they are
/// kept, drawn or shared.
pub trait DecorationStore {
    fn insert_batch(&mut self, batch: Vec<Decoration>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store that keeps everything it is given
#[derive(Debug, Default)]
pub struct DecorationLog {
    items: Vec<Decoration>,
}

impl DecorationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Decoration] {
        &self.items
    }
}

impl DecorationStore for DecorationLog {
    fn insert_batch(&mut self, batch: Vec<Decoration>) {
        self.items.extend(batch);
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// The tree's cone, used to scatter airdropped decorations over its surface.
///
/// The radius is `base_radius` at `base_height` and shrinks linearly to zero
/// at `base_height + height`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConeScatter {
    pub base_height: f32,
    pub height: f32,
    pub base_radius: f32,
}

impl Default for ConeScatter {
    fn default() -> Self {
        Self {
            base_height: 1.5,
            height: 3.5,
            base_radius: 1.5,
        }
    }
}

impl ConeScatter {
    /// Cone radius `h` units above the base
    pub fn radius_at(&self, h: f32) -> f32 {
        (1.0 - h / self.height).max(0.0) * self.base_radius
    }

    /// Random point on the cone surface
    pub fn sample(&self, rng: &mut SceneRng) -> Vec3 {
        let h = rng.range(0.0, self.height);
        let r = self.radius_at(h);
        let theta = rng.angle();
        Vec3::new(r * theta.cos(), self.base_height + h, r * theta.sin())
    }

    /// Whether `position` lies within the cone's radial bound at its height
    pub fn contains(&self, position: Vec3) -> bool {
        const EPS: f32 = 1e-4;
        let h = position.y - self.base_height;
        h >= -EPS
            && h <= self.height + EPS
            && position.horizontal_length() <= self.radius_at(h.max(0.0)) + EPS
    }

    /// `count` airdrop decorations with uniformly random kind and color
    pub fn scatter(&self, count: usize, rng: &mut SceneRng) -> Vec<Decoration> {
        let timestamp_ms = now_ms();
        (0..count)
            .map(|_| Decoration {
                id: DecorationId::new(),
                position: self.sample(rng),
                kind: *rng.pick(&DecorationKind::ALL),
                color: Color::from_hex(*rng.pick(&AIRDROP_PALETTE)),
                sender: AIRDROP_SENDER.to_string(),
                message: AIRDROP_MESSAGE.to_string(),
                timestamp_ms,
            })
            .collect()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
