// crates/ops-controller-adapters/src/bus.rs
// ============================================================================
// Module: Integration Bus Adapters
// Description: A no-op bus for when integrations are not wired, and a
// recording bus that keeps published events in memory for inspection
// (tests, local dev).
// Purpose: Let callers opt in to observing published events without forcing
// a real message broker dependency.
// Dependencies: ops-controller-core, std::sync
// ============================================================================

use std::collections::BTreeMap;
use std::sync::RwLock;

use ops_controller_core::IntegrationBus;
use ops_controller_core::IntegrationBusError;

/// Discards every published event. The default when no downstream
/// integration is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBus;

impl IntegrationBus for NoopBus {
    fn publish(&self, _kind: &str, _payload: &BTreeMap<String, String>) -> Result<(), IntegrationBusError> {
        Ok(())
    }
}

/// One published event, as retained by [`RecordingBus`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    /// The event kind, e.g. `"service.registered"`.
    pub kind: String,
    /// The string payload passed to `publish`.
    pub payload: BTreeMap<String, String>,
}

/// Keeps every published event in memory, in publish order.
#[derive(Default)]
pub struct RecordingBus {
    /// Published events in publish order.
    events: RwLock<Vec<PublishedEvent>>,
}

impl RecordingBus {
    /// Creates an empty recording bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every event published so far, in publish order.
    ///
    /// # Errors
    /// Returns an error message string if the internal lock was poisoned.
    pub fn events(&self) -> Result<Vec<PublishedEvent>, String> {
        let events = self.events.read().map_err(|_| "recording bus lock poisoned".to_string())?;
        Ok(events.clone())
    }
}

impl IntegrationBus for RecordingBus {
    fn publish(&self, kind: &str, payload: &BTreeMap<String, String>) -> Result<(), IntegrationBusError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| IntegrationBusError::Backend("recording bus lock poisoned".to_string()))?;
        events.push(PublishedEvent { kind: kind.to_string(), payload: payload.clone() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::IntegrationBus;
    use super::NoopBus;
    use super::RecordingBus;

    #[test]
    fn recording_bus_retains_published_events_in_order() {
        let bus = RecordingBus::new();
        let mut payload_a = BTreeMap::new();
        payload_a.insert("service_id".to_string(), "svc-1".to_string());
        bus.publish("service.registered", &payload_a).expect("publish ok");
        bus.publish("service.registered", &BTreeMap::new()).expect("publish ok");

        let events = bus.events().expect("no lock error");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, "service.registered");
        assert_eq!(events[0].payload.get("service_id"), Some(&"svc-1".to_string()));
    }

    #[test]
    fn noop_bus_never_errors() {
        let bus = NoopBus;
        assert!(bus.publish("anything", &BTreeMap::new()).is_ok());
    }
}
