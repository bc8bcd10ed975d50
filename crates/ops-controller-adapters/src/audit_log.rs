// crates/ops-controller-adapters/src/audit_log.rs
// ============================================================================
// Module: In-Memory Audit Log
// Description: Default AuditLog adapter backed by a process-local append
// vector.
// Purpose: Ship a working backend with no external dependency.
// Dependencies: ops-controller-core, std::sync
// ============================================================================

use std::sync::RwLock;

use ops_controller_core::AuditLog;
use ops_controller_core::AuditLogError;
use ops_controller_core::TimelineEvent;

/// Process-local, in-memory [`AuditLog`] implementation.
#[derive(Default)]
pub struct InMemoryAuditLog {
    /// Events in append order.
    events: RwLock<Vec<TimelineEvent>>,
}

impl InMemoryAuditLog {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditLog for InMemoryAuditLog {
    fn record(&self, event: &TimelineEvent) -> Result<(), AuditLogError> {
        let mut events = self.events.write().map_err(|_| lock_poisoned())?;
        events.push(event.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<TimelineEvent>, AuditLogError> {
        let events = self.events.read().map_err(|_| lock_poisoned())?;
        Ok(events.clone())
    }
}

fn lock_poisoned() -> AuditLogError {
    AuditLogError::Backend("in-memory audit log lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::AuditLog;
    use super::InMemoryAuditLog;
    use super::TimelineEvent;

    fn sample_event(message: &str) -> TimelineEvent {
        TimelineEvent {
            message: message.to_string(),
            actor: "system".to_string(),
            event_type: "service_registered".to_string(),
            timestamp: platform_core::Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("valid"),
            correlation_id: None,
            trace_id: None,
        }
    }

    #[test]
    fn record_then_list_preserves_append_order() {
        let log = InMemoryAuditLog::new();
        log.record(&sample_event("first")).expect("record ok");
        log.record(&sample_event("second")).expect("record ok");
        let events = log.list().expect("list ok");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].message, "second");
    }
}
