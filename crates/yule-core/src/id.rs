//! Stable decoration identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A globally unique decoration identifier.
///
/// Decorations are handed to an external store that may persist or share
/// them, so ids are random v4 UUIDs rather than process-local counters.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationId(pub Uuid);

impl DecorationId {
    /// Create a new random DecorationId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecorationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecorationId({})", self.0)
    }
}

impl fmt::Display for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
