//! Audio cue contract: the simulation names a moment, the host plays it

use serde::Serialize;

/// A sound the scene asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Campfire flare ignition
    FireWhoosh,
    /// Firework burst launched
    FireworkLaunch,
    /// Airdrop approach begins
    SleighBells,
    /// Airdrop box hits the ground
    ImpactThud,
    /// Tree lights charging up
    PowerUp,
    /// Tree lights switched off
    PowerDown,
    /// A decoration was hung on the tree
    Chime,
}

/// Receives audio cues synchronously. Implementations must not block; the
/// simulation never waits on playback.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Logs every cue at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("[audio] cue {cue:?}");
    }
}
