//! Scene events reported to the host after each tick

use serde::Serialize;
use yule_core::{DecorationId, Vec3};

/// Something observable that happened during a tick.
///
/// Events are informational: every side effect they describe has already
/// been applied by the time the host drains the bus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    /// A campfire flare was (re)ignited
    FlareIgnited { campfire: usize },
    /// A campfire flare burned out and returned to idle
    FlareExpired { campfire: usize },
    /// A firework burst was created
    FireworkLaunched { position: Vec3 },
    /// A firework burst completed and was released
    FireworkFinished { position: Vec3 },
    /// The airdrop sequence left idle
    AirdropStarted,
    /// The airdrop box reached the ground
    AirdropLanded,
    /// The airdrop exploded and spawned decorations
    AirdropExploded { decorations: usize },
    /// The airdrop sequence returned to idle
    AirdropCompleted,
    /// A user-placed decoration was accepted by the store
    DecorationPlaced { id: DecorationId },
    /// Tree lights switched on or off
    LightsChanged { lit: bool },
}
