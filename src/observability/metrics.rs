//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Record one counter increment and one latency sample per dispatch
//! - Count routes registered at startup
//! - Render Prometheus text for `/mocky/metrics`
//!
//! # Metrics
//! - `mocky_requests_total` (counter): dispatches by method, route, status
//! - `mocky_request_duration_seconds` (histogram): dispatch latency
//! - `mocky_routes_registered_total` (counter): compiled routes
//!
//! # Design Decisions
//! - Disabled telemetry costs one `Option` check per call
//! - Unmatched requests share the `unmatched` route label to bound cardinality

use std::time::Instant;

use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "mocky_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "mocky_request_duration_seconds";
pub const ROUTES_REGISTERED_TOTAL: &str = "mocky_routes_registered_total";

/// Handle to the dispatch telemetry backend; cheap to clone.
#[derive(Clone, Default)]
pub struct Telemetry {
    handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Telemetry {
    /// Telemetry that records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Install the Prometheus recorder as the process-wide metrics recorder.
    pub fn install() -> Result<Self, BuildError> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        metrics::describe_counter!(REQUESTS_TOTAL, Unit::Count, "Requests dispatched");
        metrics::describe_histogram!(
            REQUEST_DURATION_SECONDS,
            Unit::Seconds,
            "Time spent dispatching a request"
        );
        metrics::describe_counter!(ROUTES_REGISTERED_TOTAL, Unit::Count, "Routes compiled from the OpenAPI document");

        tracing::info!("Metrics recorder installed");
        Ok(Self {
            handle: Some(handle),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    /// Record the outcome of one dispatch.
    pub fn record_dispatch(&self, method: &str, route: &str, status: u16, started: Instant) {
        if self.handle.is_none() {
            return;
        }
        metrics::counter!(
            REQUESTS_TOTAL,
            "method" => method.to_owned(),
            "route" => route.to_owned(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!(
            REQUEST_DURATION_SECONDS,
            "method" => method.to_owned(),
            "route" => route.to_owned()
        )
        .record(started.elapsed().as_secs_f64());
    }

    /// Record how many routes the compiler registered.
    pub fn record_routes_registered(&self, count: usize) {
        if self.handle.is_none() {
            return;
        }
        metrics::counter!(ROUTES_REGISTERED_TOTAL).increment(count as u64);
    }

    /// Prometheus exposition text, or `None` when disabled.
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}
