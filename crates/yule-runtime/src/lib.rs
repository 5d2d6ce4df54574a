//! Yule Runtime - Frame loop infrastructure
//!
//! Provides the building blocks every simulated component is driven by:
//! - `FrameClock` / `FrameTime` - elapsed time and per-frame delta
//! - `SceneEvent` / `EventBus` - typed event queue drained by the host
//! - `AudioCue` / `AudioSink` - fire-and-forget sound notifications
//! - `SceneSystem` - trait for systems ticked once per frame

mod audio;
mod clock;
mod event;
mod event_bus;
mod system;

pub use audio::{AudioCue, AudioSink, LogAudio, SilentAudio};
pub use clock::{FrameClock, FrameTime};
pub use event::SceneEvent;
pub use event_bus::EventBus;
pub use system::SceneSystem;
