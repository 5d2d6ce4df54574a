//! Yule Sequence - phased scripted events
//!
//! A phased event is a finite-state machine that drives one scripted,
//! multi-second animation end to end and emits discrete triggers at its
//! phase boundaries. The airdrop (approach → drop → impact → explosion) is
//! the sequence the scene uses.

pub mod airdrop;
pub mod config;
pub mod phase;

pub use airdrop::{AirdropController, AirdropView};
pub use config::AirdropConfig;
pub use phase::{Phase, SequenceTrigger};
