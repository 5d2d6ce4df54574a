//! Scene system trait

use crate::clock::FrameTime;
use yule_core::Result;

/// A system that can be ticked by the frame loop
///
/// The host calls `update` exactly once per rendered frame. Calling it twice
/// for the same frame advances the simulation twice.
pub trait SceneSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, time: FrameTime) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
