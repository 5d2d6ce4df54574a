//! Event bus for reporting scene events to the host

use crate::event::SceneEvent;

/// A simple event queue that systems push to and the host drains
pub struct EventBus {
    events: Vec<SceneEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yule_core::Vec3;

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(SceneEvent::AirdropStarted);
        bus.push(SceneEvent::FireworkLaunched {
            position: Vec3::new(0.0, 2.0, 0.0),
        });

        assert_eq!(bus.len(), 2);
        assert!(!bus.is_empty());

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SceneEvent::AirdropStarted);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(SceneEvent::AirdropLanded);

        let _ = bus.drain();
        let events = bus.drain();
        assert!(events.is_empty());
    }
}
