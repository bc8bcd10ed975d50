// crates/ops-controller-adapters/src/log_sink.rs
// ============================================================================
// Module: In-Memory Log Sink
// Description: Default LogSink adapter backed by a process-local append log.
// Purpose: Ship a working backend with no external dependency.
// Dependencies: ops-controller-core, std::sync
// ============================================================================

use std::sync::RwLock;

use ops_controller_core::LogFilter;
use ops_controller_core::LogRecord;
use ops_controller_core::LogSink;
use ops_controller_core::LogSinkError;

/// Process-local, in-memory [`LogSink`] implementation.
#[derive(Default)]
pub struct InMemoryLogSink {
    /// Records in ingestion order.
    records: RwLock<Vec<LogRecord>>,
}

impl InMemoryLogSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for InMemoryLogSink {
    fn ingest(&self, record: &LogRecord) -> Result<(), LogSinkError> {
        let mut records = self.records.write().map_err(|_| lock_poisoned())?;
        records.push(record.clone());
        Ok(())
    }

    fn search(&self, filter: &LogFilter) -> Result<Vec<LogRecord>, LogSinkError> {
        let records = self.records.read().map_err(|_| lock_poisoned())?;
        let mut matched: Vec<LogRecord> = records
            .iter()
            .rev()
            .filter(|record| matches(record, filter))
            .cloned()
            .collect();
        if filter.limit > 0 {
            matched.truncate(filter.limit);
        }
        Ok(matched)
    }
}

fn matches(record: &LogRecord, filter: &LogFilter) -> bool {
    if let Some(service_id) = &filter.service_id {
        if &record.service_id != service_id {
            return false;
        }
    }
    if let Some(env) = &filter.env {
        if record.env.as_deref() != Some(env.as_str()) {
            return false;
        }
    }
    if let Some(level) = &filter.level {
        if record.level.as_deref() != Some(level.as_str()) {
            return false;
        }
    }
    if let Some(trace_id) = &filter.trace_id {
        if record.trace_id.as_deref() != Some(trace_id.as_str()) {
            return false;
        }
    }
    if let Some(correlation_id) = &filter.correlation_id {
        let matches_correlation = record
            .correlation_id
            .as_ref()
            .is_some_and(|id| id.as_str() == correlation_id);
        if !matches_correlation {
            return false;
        }
    }
    true
}

fn lock_poisoned() -> LogSinkError {
    LogSinkError::Backend("in-memory log sink lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use ops_controller_core::ServiceId;

    use super::InMemoryLogSink;
    use super::LogFilter;
    use super::LogSink;

    fn sample_record(service_id: &str, level: &str) -> ops_controller_core::LogRecord {
        ops_controller_core::LogRecord {
            service_id: ServiceId::new(service_id),
            env: Some("prod".to_string()),
            level: Some(level.to_string()),
            message: "something happened".to_string(),
            trace_id: None,
            correlation_id: None,
            container_name: None,
            extra: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn search_filters_by_service_and_level_newest_first() {
        let sink = InMemoryLogSink::new();
        sink.ingest(&sample_record("svc-a", "info")).expect("ingest ok");
        sink.ingest(&sample_record("svc-a", "error")).expect("ingest ok");
        sink.ingest(&sample_record("svc-b", "error")).expect("ingest ok");

        let filter = LogFilter {
            service_id: Some(ServiceId::new("svc-a")),
            level: Some("error".to_string()),
            limit: 10,
            ..LogFilter::default()
        };
        let found = sink.search(&filter).expect("search ok");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service_id, ServiceId::new("svc-a"));
    }

    #[test]
    fn search_honors_limit() {
        let sink = InMemoryLogSink::new();
        for _ in 0..5 {
            sink.ingest(&sample_record("svc-a", "info")).expect("ingest ok");
        }
        let filter = LogFilter { limit: 2, ..LogFilter::default() };
        assert_eq!(sink.search(&filter).expect("search ok").len(), 2);
    }
}
