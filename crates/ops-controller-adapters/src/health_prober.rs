// crates/ops-controller-adapters/src/health_prober.rs
// ============================================================================
// Module: Blocking HTTP Health Prober
// Description: HealthProbe adapter that issues a GET against a service's
// health_url with a bounded timeout.
// Purpose: Give CheckHealth a working default transport.
// Dependencies: ops-controller-core, reqwest (blocking)
// ============================================================================

//! ## Overview
//! This is deliberately a thin GET-and-classify client: no host allowlist,
//! no redirect policy beyond reqwest's default, no retry. A deployment that
//! needs to guard against SSRF via caller-configured `health_url` values
//! should wrap or replace this adapter; the port does not mandate one
//! particular policy.

use std::time::Duration;

use ops_controller_core::HealthProbe;
use ops_controller_core::HealthProbeError;
use ops_controller_core::HealthReport;
use ops_controller_core::HealthStatus;
use ops_controller_core::ServiceId;

/// Default probe timeout for a single health check.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Blocking-HTTP [`HealthProbe`] implementation.
pub struct HttpHealthProbe {
    /// Shared blocking HTTP client.
    client: reqwest::blocking::Client,
}

impl HttpHealthProbe {
    /// Builds a prober with [`PROBE_TIMEOUT`] as its request timeout.
    ///
    /// # Errors
    /// Returns [`HealthProbeError::Client`] if the underlying TLS backend
    /// could not be initialized.
    pub fn new() -> Result<Self, HealthProbeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|err| HealthProbeError::Client(err.to_string()))?;
        Ok(Self { client })
    }
}

impl HealthProbe for HttpHealthProbe {
    fn probe(&self, service_id: &ServiceId, health_url: &str) -> Result<HealthReport, HealthProbeError> {
        let report = match self.client.get(health_url).send() {
            Ok(response) => {
                let status = response.status();
                let http_status = Some(status.as_u16());
                let healthy = status.as_u16() < 300;
                let body = response.text().unwrap_or_default();
                let detail: String = body.chars().take(200).collect();
                HealthReport {
                    service_id: service_id.clone(),
                    status: if healthy { HealthStatus::Healthy } else { HealthStatus::Degraded },
                    http_status,
                    detail: Some(detail),
                }
            }
            Err(err) => HealthReport {
                service_id: service_id.clone(),
                status: HealthStatus::Degraded,
                http_status: None,
                detail: Some(err.to_string()),
            },
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::HttpHealthProbe;

    #[test]
    fn builds_successfully_with_default_timeout() {
        assert!(HttpHealthProbe::new().is_ok());
    }
}
